use crate::config::Theme;
use crate::habits::HabitForm;
use crate::models::{FrequencyGoal, Habit, JoinRow, Record};
use crate::records::RecordForm;
use crate::storefront::{Address, Order, OrderSummary, Slideshow, TAX_PERCENT};
use std::collections::HashMap;

/// Everything the dashboard page needs for one render.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub theme: Theme,
    pub habits: Vec<Habit>,
    pub records: Vec<Record>,
    pub rows: Vec<JoinRow>,
    pub habit_form: HabitForm,
    pub habit_error: Option<String>,
    /// Habit being edited, with the values currently in its form.
    pub editing: Option<(i64, HabitForm)>,
    pub edit_error: Option<String>,
    pub list_error: Option<String>,
    pub record_form: RecordForm,
    pub record_alert: Option<String>,
    pub load_error: Option<String>,
}

pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn render_dashboard(view: &Dashboard) -> String {
    let (panel, button) = view.theme.colors();
    let body = format!(
        "{}{}{}",
        habit_section(view),
        record_section(view),
        table_section(&view.rows)
    );
    layout("Habits", (panel, button), &body)
}

fn habit_section(view: &Dashboard) -> String {
    let mut html = String::from(
        r#"<section class="card panel"><header><h1>Habit App</h1><p class="subtitle">Manage habits and records</p></header>"#,
    );
    html.push_str(&habit_form_html(
        "/habits",
        &view.habit_form,
        view.habit_error.as_deref(),
        "Add habit",
        None,
    ));

    html.push_str("<h2>Habits</h2>");
    if let Some(message) = &view.list_error {
        html.push_str(&format!(r#"<p class="error">{}</p>"#, escape(message)));
    }
    html.push_str(r#"<div class="habit-list">"#);
    for habit in &view.habits {
        html.push_str(r#"<div class="habit">"#);
        match &view.editing {
            Some((id, form)) if *id == habit.id => {
                html.push_str(&habit_form_html(
                    &format!("/habits/{id}/edit"),
                    form,
                    view.edit_error.as_deref(),
                    "Save",
                    Some("/"),
                ));
            }
            _ => {
                html.push_str(&format!(
                    r#"<div class="grow"><p class="muted">ID: {id}</p><p class="name">{name}</p><p>{description}</p><p class="muted"><em>Goal: {goal}</em></p></div>
<div class="row-actions"><a class="btn" href="/?edit={id}">Edit</a>
<form method="post" action="/habits/{id}/delete"><button class="danger" type="submit">Delete</button></form></div>"#,
                    id = habit.id,
                    name = escape(&habit.name),
                    description = escape(&habit.description),
                    goal = escape(habit.frequency.label()),
                ));
            }
        }
        html.push_str("</div>");
    }
    html.push_str("</div></section>");
    html
}

fn habit_form_html(
    action: &str,
    form: &HabitForm,
    error: Option<&str>,
    submit: &str,
    cancel: Option<&str>,
) -> String {
    let mut options = String::new();
    let current = FrequencyGoal::from(form.frequency.clone());
    for goal in FrequencyGoal::OPTIONS {
        let selected = if goal == current { " selected" } else { "" };
        options.push_str(&format!(
            r#"<option value="{value}"{selected}>{label}</option>"#,
            value = escape(goal.as_str()),
            label = escape(goal.label()),
        ));
    }
    let mut html = format!(
        r#"<form class="stack" method="post" action="{action}">
<input type="text" name="name" placeholder="Name" value="{name}" required />
<input type="text" name="description" placeholder="Description" value="{description}" required />
<select name="frequency" required>{options}</select>"#,
        name = escape(&form.name),
        description = escape(&form.description),
    );
    if let Some(error) = error {
        html.push_str(&format!(r#"<p class="error">{}</p>"#, escape(error)));
    }
    html.push_str(&format!(r#"<button type="submit">{submit}</button>"#));
    if let Some(href) = cancel {
        html.push_str(&format!(r#"<a class="btn secondary" href="{href}">Cancel</a>"#));
    }
    html.push_str("</form>");
    html
}

fn record_section(view: &Dashboard) -> String {
    let mut html = String::from(
        r#"<section class="card panel"><header><h1>Log activity</h1><p class="subtitle">Record your habits and follow your daily progress</p></header>"#,
    );
    if let Some(message) = &view.load_error {
        html.push_str(&format!(
            r#"<div class="banner"><strong>Load error</strong><p>{}</p></div>"#,
            escape(message)
        ));
    }
    if let Some(message) = &view.record_alert {
        html.push_str(&format!(r#"<div class="banner" role="alert">{}</div>"#, escape(message)));
    }

    let form = &view.record_form;
    let mut options = String::from(r#"<option value="0">Select a habit</option>"#);
    for habit in &view.habits {
        let selected = if habit.id == form.habit_id { " selected" } else { "" };
        options.push_str(&format!(
            r#"<option value="{id}"{selected}>ID: {id} - {name} - {description}</option>"#,
            id = habit.id,
            name = escape(&habit.name),
            description = escape(&habit.description),
        ));
    }
    let (yes, no) = if form.is_completed() {
        (" selected", "")
    } else {
        ("", " selected")
    };
    html.push_str(&format!(
        r#"<form class="stack" method="post" action="/records">
<label>Habit<select name="habit_id" required>{options}</select></label>
<label>Date<input type="date" name="date" value="{date}" required /></label>
<label>Completed?<select name="completed"><option value="true"{yes}>Yes</option><option value="false"{no}>No</option></select></label>
<label>Notes<textarea name="notes" placeholder="e.g. felt full of energy today">{notes}</textarea></label>
<button type="submit">Save record</button>
</form>"#,
        date = escape(&form.date),
        notes = escape(&form.notes),
    ));

    html.push_str("<h2>Record history</h2>");
    if view.records.is_empty() {
        html.push_str(r#"<p class="muted">No saved records.</p>"#);
    } else {
        let by_id: HashMap<i64, &Habit> = view.habits.iter().map(|h| (h.id, h)).collect();
        html.push_str(r#"<div class="history">"#);
        for record in &view.records {
            let habit = by_id.get(&record.habit_id);
            let name = record
                .habit_name
                .as_deref()
                .or(habit.map(|h| h.name.as_str()))
                .filter(|name| !name.is_empty())
                .unwrap_or("No name");
            let description = habit
                .map(|h| h.description.as_str())
                .filter(|d| !d.is_empty())
                .unwrap_or("No description");
            let goal = habit.map(|h| h.frequency.label()).unwrap_or("Not set");
            let habit_ref = if record.habit_id == 0 {
                "N/A".to_string()
            } else {
                record.habit_id.to_string()
            };
            let notes = if record.notes.is_empty() {
                "No notes"
            } else {
                record.notes.as_str()
            };
            let status = if record.completed { "Completed" } else { "Pending" };
            html.push_str(&format!(
                r#"<div class="entry"><p class="name">ID: {habit_ref} - {name} - {description}</p>
<p class="muted"><em>Goal: {goal}</em></p><p>Date: {date}</p><p>Notes: {notes}</p><p>Status: {status}</p></div>"#,
                name = escape(name),
                description = escape(description),
                goal = escape(goal),
                date = escape(&record.date),
                notes = escape(notes),
            ));
        }
        html.push_str("</div>");
    }
    html.push_str("</section>");
    html
}

fn table_section(rows: &[JoinRow]) -> String {
    let mut html = String::from(
        r#"<section class="card wide"><h2>Habits and records</h2>
<form method="post" action="/table/refresh"><button type="submit" class="secondary">Refresh</button></form>
<table><thead><tr><th>Name</th><th>Habit</th><th>Goal</th><th>Date</th><th>Completed</th><th>Note</th></tr></thead><tbody>"#,
    );
    if rows.is_empty() {
        html.push_str(r#"<tr><td colspan="6" class="muted center">No records</td></tr>"#);
    }
    for row in rows {
        html.push_str(&format!(
            r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class="center">{}</td><td>{}</td></tr>"#,
            escape(&row.name),
            escape(&row.description),
            escape(&row.goal),
            escape(&row.date),
            row.completed,
            escape(&row.notes),
        ));
    }
    html.push_str("</tbody></table></section>");
    html
}

fn summary_html(summary: &OrderSummary) -> String {
    format!(
        r#"<div class="summary"><span>Products</span><span class="right">{items}</span>
<span>Subtotal</span><span class="right">{subtotal}</span>
<span>Tax ({rate}%)</span><span class="right">{tax}</span>
<span class="total">Total:</span><span class="total right">{total}</span></div>"#,
        items = summary.items_label(),
        rate = TAX_PERCENT,
        subtotal = summary.subtotal,
        tax = summary.tax,
        total = summary.total,
    )
}

fn address_html(address: &Address) -> String {
    let mut html = format!(r#"<div class="address"><p class="name">{}</p>"#, escape(&address.name));
    for line in &address.lines {
        html.push_str(&format!("<p>{}</p>", escape(line)));
    }
    html.push_str(&format!("<p>{}</p></div>", escape(&address.phone)));
    html
}

pub fn render_checkout(summary: &OrderSummary, address: &Address, order_id: &str) -> String {
    let body = format!(
        r##"<section class="card"><h2>Order summary</h2>{summary}
<h2>Delivery address</h2>{address}<hr />
<p class="small">By clicking "Place order" you accept our <a href="#">terms and conditions</a> and <a href="#">privacy policy</a>.</p>
<a class="btn" href="/orders/{id}">Place order</a></section>"##,
        summary = summary_html(summary),
        address = address_html(address),
        id = escape(order_id),
    );
    layout("Checkout", STORE_COLORS, &body)
}

pub fn render_order(order: &Order) -> String {
    let badge = format!(
        r#"<div class="badge {class}">{label}</div>"#,
        class = if order.paid { "paid" } else { "pending" },
        label = order.status_label(),
    );
    let mut lines = String::new();
    for line in &order.lines {
        lines.push_str(&format!(
            r#"<div class="line"><img src="/static/products/{image}" width="100" height="100" alt="{title}" />
<div><p>{title}</p><p>{price} x {qty}</p><p class="name">Subtotal: {subtotal}</p></div></div>"#,
            image = escape(line.product.images.first().map(String::as_str).unwrap_or_default()),
            title = escape(&line.product.title),
            price = line.product.price,
            qty = line.quantity,
            subtotal = line.subtotal(),
        ));
    }
    let body = format!(
        r#"<section class="card wide"><h1>Order #{id}</h1>{badge}
<div class="columns"><div>{lines}</div>
<div class="card"><h2>Delivery address</h2>{address}<hr /><h2>Order summary</h2>{summary}{badge}</div></div></section>"#,
        id = escape(&order.id),
        address = address_html(&order.address),
        summary = summary_html(&order.summary()),
    );
    layout(&format!("Order #{}", order.id), STORE_COLORS, &body)
}

pub fn render_slideshow(slides: &Slideshow) -> String {
    let mut items = String::new();
    for (index, image) in slides.images.iter().enumerate() {
        items.push_str(&format!(
            r#"<div class="slide{active}"><img src="/static/products/{image}" alt="{title}" width="600" height="500" /></div>"#,
            active = if index == 0 { " active" } else { "" },
            image = escape(image),
            title = escape(&slides.title),
        ));
    }
    let body = fill(
        SLIDESHOW_HTML,
        &[
            ("GAP", slides.space_between_px.to_string().as_str()),
            ("PER_VIEW", slides.slides_per_view.to_string().as_str()),
            ("DELAY", slides.autoplay_delay_ms.to_string().as_str()),
            ("PAUSE", if slides.pause_on_interaction { "true" } else { "false" }),
            ("TITLE", escape(&slides.title).as_str()),
            ("SLIDES", items.as_str()),
        ],
    );
    layout(&slides.title, STORE_COLORS, &body)
}

const STORE_COLORS: (&str, &str) = ("#ffffff", "#2563eb");

fn layout(title: &str, (panel, button): (&str, &str), body: &str) -> String {
    fill(
        LAYOUT_HTML,
        &[
            ("PANEL", panel),
            ("BUTTON", button),
            ("TITLE", escape(title).as_str()),
            ("BODY", body),
        ],
    )
}

/// Substitutes `{{KEY}}` placeholders in a single pass over `template`.
/// Inserted values are never scanned again.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let found = after.find("}}").and_then(|end| {
            values
                .iter()
                .find(|(key, _)| *key == &after[..end])
                .map(|(_, value)| (end, *value))
        });
        match found {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    * { box-sizing: border-box; }
    body {
      margin: 0;
      min-height: 100vh;
      background: #f9fafb;
      color: #1f2937;
      font-family: "Trebuchet MS", sans-serif;
      display: flex;
      flex-direction: column;
      align-items: center;
      gap: 40px;
      padding: 24px;
    }
    .card {
      width: min(900px, 100%);
      background: white;
      border-radius: 16px;
      box-shadow: 0 10px 30px rgba(0, 0, 0, 0.08);
      padding: 24px;
    }
    .card.panel { background: {{PANEL}}; }
    .card.wide { width: min(1150px, 100%); }
    header { text-align: center; margin-bottom: 20px; }
    h1, h2 { margin: 0 0 12px; }
    .subtitle, .muted { color: #6b7280; }
    .small { font-size: 0.75rem; }
    .center { text-align: center; }
    .right { text-align: right; }
    .stack { display: grid; gap: 10px; max-width: 440px; margin: 0 auto 24px; }
    input, select, textarea { padding: 8px; border: 1px solid #d1d5db; border-radius: 8px; width: 100%; }
    button, .btn {
      border: none;
      border-radius: 8px;
      padding: 8px 14px;
      color: white;
      background: {{BUTTON}};
      cursor: pointer;
      text-decoration: none;
      display: inline-block;
    }
    .secondary { background: #9ca3af; }
    .danger { background: #dc2626; }
    .error { color: #ef4444; font-size: 0.875rem; }
    .banner { background: #fee2e2; border: 1px solid #f87171; color: #b91c1c; padding: 12px; border-radius: 8px; margin-bottom: 16px; }
    .habit-list, .history { display: grid; gap: 12px; }
    .habit { display: flex; justify-content: space-between; align-items: center; background: white; border: 1px solid #e5e7eb; border-radius: 8px; padding: 14px; }
    .habit .grow { flex: 1; }
    .row-actions { display: flex; gap: 8px; }
    .entry { border: 1px solid #d1d5db; border-radius: 8px; padding: 14px; background: white; }
    .name { font-weight: 600; }
    table { width: 100%; border-collapse: collapse; }
    th, td { padding: 8px 14px; border-bottom: 1px solid #e5e7eb; text-align: left; }
    thead { background: #f3f4f6; }
    .summary { display: grid; grid-template-columns: 1fr 1fr; gap: 4px; margin-bottom: 24px; }
    .summary .total { font-size: 1.5rem; margin-top: 16px; }
    .badge { color: white; font-weight: 700; font-size: 0.8rem; border-radius: 8px; padding: 8px 14px; margin: 16px 0; }
    .badge.paid { background: #22c55e; }
    .badge.pending { background: #ef4444; }
    .columns { display: grid; grid-template-columns: repeat(auto-fit, minmax(320px, 1fr)); gap: 40px; }
    .line { display: flex; gap: 20px; margin-bottom: 20px; }
    hr { border: none; height: 2px; background: #e5e7eb; margin: 24px 0; }
  </style>
</head>
<body>
{{BODY}}
</body>
</html>
"#;

const SLIDESHOW_HTML: &str = r#"<section class="card slideshow" data-per-view="{{PER_VIEW}}" data-delay="{{DELAY}}" data-pause="{{PAUSE}}">
  <h1>{{TITLE}}</h1>
  <div class="track" style="display: flex; gap: {{GAP}}px; overflow: hidden; height: 500px;">{{SLIDES}}</div>
  <button type="button" class="prev" aria-label="Previous">&lsaquo;</button>
  <button type="button" class="next" aria-label="Next">&rsaquo;</button>
  <style>
    .slide { display: none; flex: 0 0 100%; }
    .slide.active { display: block; }
    .slide img { object-fit: cover; width: 100%; height: 100%; }
  </style>
  <script>
    (() => {
      const root = document.querySelector(".slideshow");
      const slides = Array.from(root.querySelectorAll(".slide"));
      const delay = Number(root.dataset.delay);
      const pause = root.dataset.pause === "true";
      let index = 0;
      let timer = null;
      const show = (next) => {
        if (slides.length === 0) return;
        slides[index].classList.remove("active");
        index = (next + slides.length) % slides.length;
        slides[index].classList.add("active");
      };
      const start = () => { timer = setInterval(() => show(index + 1), delay); };
      const touch = (step) => {
        show(index + step);
        if (pause && timer) { clearInterval(timer); timer = null; }
      };
      root.querySelector(".prev").addEventListener("click", () => touch(-1));
      root.querySelector(".next").addEventListener("click", () => touch(1));
      start();
    })();
  </script>
</section>"#;
