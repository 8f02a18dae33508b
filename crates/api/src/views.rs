//! HTML views rendered with Handlebars.
//!
//! Templates are compiled in at build time and registered once at startup.
//! Times reach the templates already formatted as UTC strings.

use axum::response::Html;
use eyre::{Result, WrapErr};
use handlebars::Handlebars;
use serde_json::json;
use slotbook_core::{
    errors::{SchedulingError, SchedulingResult},
    models::{participant::Participant, slot::SlotDisplay},
};

use crate::middleware::flash::Flash;

const LAYOUT_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{{title}} | Slotbook</title>
  <style>
    body { font-family: sans-serif; margin: 2rem auto; max-width: 60rem; }
    .flash { padding: .5rem 1rem; margin-bottom: 1rem; }
    .flash.success { background: #e6f4ea; }
    .flash.error { background: #fce8e6; }
    table { border-collapse: collapse; width: 100%; }
    td, th { border-bottom: 1px solid #ddd; padding: .4rem; text-align: left; }
  </style>
</head>
<body>
{{#if flash}}<div class="flash {{flash.kind}}">{{flash.message}}</div>{{/if}}
"#;

const HOME_TEMPLATE: &str = r#"{{> head}}
<h1>Scheduled interviews</h1>
<p><a href="/create-list">Schedule an interview</a></p>
<table>
  <thead><tr><th>Description</th><th>Category</th><th>Start (UTC)</th><th>End (UTC)</th><th>Participants</th><th></th></tr></thead>
  <tbody>
  {{#each slots}}
    <tr data-id="{{id}}">
      <td>{{description}}</td>
      <td>{{category}}</td>
      <td>{{start_time}}</td>
      <td>{{end_time}}</td>
      <td>{{#each participants}}{{name}}{{#unless @last}}, {{/unless}}{{/each}}</td>
      <td><button type="button" onclick="removeSlot('{{id}}')">Delete</button></td>
    </tr>
  {{else}}
    <tr><td colspan="6">Nothing scheduled yet.</td></tr>
  {{/each}}
  </tbody>
</table>

<h2>Participants</h2>
<ul>
{{#each participants}}
  <li>{{name}} &lt;{{email}}&gt; {{phone}}</li>
{{/each}}
</ul>

<h2>Add participant</h2>
<form method="post" action="/add-participant" onsubmit="return addParticipant(this)">
  <input name="name" placeholder="Name" required>
  <input name="phone" placeholder="Phone">
  <input name="email" type="email" placeholder="Email">
  <button type="submit">Add</button>
</form>

<script>
  async function removeSlot(id) {
    const response = await fetch('/delete/' + id, { method: 'DELETE' });
    window.location = response.url;
  }
  async function addParticipant(form) {
    await fetch('/add-participant', { method: 'POST', body: new URLSearchParams(new FormData(form)) });
    window.location.reload();
    return false;
  }
</script>
</body>
</html>
"#;

const CREATE_TEMPLATE: &str = r#"{{> head}}
<h1>Schedule an interview</h1>
<form method="post" action="/create-list">
  <p><label>Description <input name="description"></label></p>
  <p><label>Category <input name="category"></label></p>
  <p><label>Date <input name="date" type="date" required></label></p>
  <p><label>Start <input name="start_time" type="time" required></label>
     <label>End <input name="end_time" type="time" required></label>
     <small>(UTC{{input_offset}})</small></p>
  <fieldset>
    <legend>Participants (at least two)</legend>
    {{#each participants}}
      <label><input type="checkbox" name="pid" value="{{id}}"> {{name}}</label><br>
    {{else}}
      <p>No participants yet.</p>
    {{/each}}
  </fieldset>
  <p><button type="submit">Schedule</button> <a href="/">Cancel</a></p>
</form>
</body>
</html>
"#;

pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);

        registry
            .register_partial("head", LAYOUT_HEAD)
            .wrap_err("Failed to register layout partial")?;
        registry
            .register_template_string("home", HOME_TEMPLATE)
            .wrap_err("Failed to register home template")?;
        registry
            .register_template_string("create_list", CREATE_TEMPLATE)
            .wrap_err("Failed to register create_list template")?;

        Ok(Self { registry })
    }

    pub fn home(
        &self,
        slots: &[SlotDisplay],
        participants: &[Participant],
        flash: Option<&Flash>,
    ) -> SchedulingResult<Html<String>> {
        self.render(
            "home",
            json!({
                "title": "Interviews",
                "slots": slots,
                "participants": participants,
                "flash": flash,
            }),
        )
    }

    pub fn create_list(
        &self,
        participants: &[Participant],
        input_offset: &str,
        flash: Option<&Flash>,
    ) -> SchedulingResult<Html<String>> {
        self.render(
            "create_list",
            json!({
                "title": "Schedule",
                "participants": participants,
                "input_offset": input_offset,
                "flash": flash,
            }),
        )
    }

    fn render(&self, name: &str, data: serde_json::Value) -> SchedulingResult<Html<String>> {
        self.registry
            .render(name, &data)
            .map(Html)
            .map_err(|e| SchedulingError::Internal(Box::new(e)))
    }
}
