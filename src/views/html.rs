use crate::session::{Toast, ToastKind};
use crate::store::{Status, Ticket};

use super::{RenderError, ViewContext, ViewRenderer};

const PRIORITIES: [&str; 3] = ["low", "medium", "high"];

/// Plain server-rendered HTML for the five pages of the app.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer;

impl ViewRenderer for HtmlRenderer {
    fn render(&self, page: &str, ctx: &ViewContext) -> Result<String, RenderError> {
        let (title, body) = match page {
            "landing" => ("Welcome", landing(ctx)),
            "login" => ("Log in", credentials_form(ctx, "login", "Log in")),
            "signup" => ("Sign up", credentials_form(ctx, "signup", "Create account")),
            "dashboard" => ("Dashboard", dashboard(ctx)),
            "tickets" => ("Tickets", tickets(ctx)),
            other => return Err(RenderError::NotFound(other.to_string())),
        };
        Ok(layout(title, ctx, &body))
    }
}

/// Escapes text for use in element content and double-quoted attributes.
fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, ctx: &ViewContext, body: &str) -> String {
    let nav = match &ctx.user {
        Some(user) => format!(
            r#"<a href="/?page=dashboard">Dashboard</a> <a href="/?page=tickets">Tickets</a> <span class="user">{}</span> <a href="/?action=logout">Log out</a>"#,
            escape(&user.email)
        ),
        None => r#"<a href="/?page=login">Log in</a> <a href="/?page=signup">Sign up</a>"#.to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} · Helpdesk</title>
</head>
<body data-page="{page}">
<header><a href="/?page=landing">Helpdesk</a> <nav>{nav}</nav></header>
{toast}<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        page = escape(&ctx.page),
        nav = nav,
        toast = ctx.toast.as_ref().map(toast).unwrap_or_default(),
        body = body,
    )
}

fn toast(toast: &Toast) -> String {
    let class = match toast.kind {
        ToastKind::Success => "success",
        ToastKind::Error => "error",
    };
    format!(
        "<div class=\"toast toast-{}\" role=\"status\">{}</div>\n",
        class,
        escape(&toast.message)
    )
}

fn field_error(ctx: &ViewContext, field: &str) -> String {
    ctx.errors
        .get(field)
        .map(|msg| format!(r#"<span class="field-error" data-field="{}">{}</span>"#, field, escape(msg)))
        .unwrap_or_default()
}

fn landing(ctx: &ViewContext) -> String {
    let cta = if ctx.user.is_some() {
        r#"<a href="/?page=dashboard">Go to dashboard</a>"#
    } else {
        r#"<a href="/?page=signup">Get started</a> or <a href="/?page=login">log in</a>"#
    };
    format!(
        "<h1>Track support tickets without the overhead</h1>\n<p>{}</p>",
        cta
    )
}

fn credentials_form(ctx: &ViewContext, action: &str, submit: &str) -> String {
    format!(
        r#"<h1>{submit}</h1>
<form method="post" action="/?action={action}">
<label>Email <input type="email" name="email"></label> {email_err}
<label>Password <input type="password" name="password"></label> {password_err}
<button type="submit">{submit}</button>
</form>"#,
        submit = escape(submit),
        action = action,
        email_err = field_error(ctx, "email"),
        password_err = field_error(ctx, "password"),
    )
}

fn dashboard(ctx: &ViewContext) -> String {
    let s = &ctx.stats;
    format!(
        r#"<h1>Dashboard</h1>
<ul class="stats">
<li data-stat="total">Total: {}</li>
<li data-stat="open">Open: {}</li>
<li data-stat="in_progress">In Progress: {}</li>
<li data-stat="closed">Closed: {}</li>
</ul>
<a href="/?page=tickets">Manage tickets</a>"#,
        s.total, s.open, s.in_progress, s.closed
    )
}

fn status_options(selected: Status) -> String {
    Status::ALL
        .iter()
        .map(|s| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                s.as_str(),
                if *s == selected { " selected" } else { "" },
                s.label()
            )
        })
        .collect()
}

fn priority_options(selected: &str) -> String {
    let mut options: Vec<String> = PRIORITIES
        .iter()
        .map(|p| {
            format!(
                r#"<option value="{p}"{sel}>{p}</option>"#,
                p = p,
                sel = if *p == selected { " selected" } else { "" }
            )
        })
        .collect();
    // Keep free-form priorities selectable when editing.
    if !PRIORITIES.iter().any(|p| *p == selected) {
        let p = escape(selected);
        options.push(format!(r#"<option value="{p}" selected>{p}</option>"#, p = p));
    }
    options.concat()
}

fn ticket_row(ticket: &Ticket) -> String {
    let id = escape(&ticket.id);
    format!(
        r#"<li class="ticket status-{status}" data-id="{id}">
<form method="post" action="/?action=update_ticket">
<input type="hidden" name="id" value="{id}">
<input type="text" name="title" value="{title}">
<textarea name="description">{description}</textarea>
<select name="status">{status_options}</select>
<select name="priority">{priority_options}</select>
<button type="submit">Save</button>
</form>
<small>Created {created}</small>
<a href="/?action=delete_ticket&amp;id={id}">Delete</a>
</li>"#,
        status = ticket.status.as_str(),
        id = id,
        title = escape(&ticket.title),
        description = escape(&ticket.description),
        status_options = status_options(ticket.status),
        priority_options = priority_options(&ticket.priority),
        created = ticket.created_at.to_rfc3339(),
    )
}

fn tickets(ctx: &ViewContext) -> String {
    let list = if ctx.tickets.is_empty() {
        "<p class=\"empty\">No tickets yet.</p>".to_string()
    } else {
        let rows: Vec<String> = ctx.tickets.iter().map(ticket_row).collect();
        format!("<ul class=\"tickets\">\n{}\n</ul>", rows.join("\n"))
    };

    format!(
        r#"<h1>Tickets</h1>
<form method="post" action="/?action=create_ticket" class="new-ticket">
<input type="text" name="title" placeholder="Title"> {title_err}
<textarea name="description" placeholder="Description"></textarea>
<select name="status">{status_options}</select> {status_err}
<select name="priority">{priority_options}</select>
<button type="submit">Create ticket</button>
</form>
{list}"#,
        title_err = field_error(ctx, "title"),
        status_err = field_error(ctx, "status"),
        status_options = status_options(Status::default()),
        priority_options = priority_options(crate::store::ticket::DEFAULT_PRIORITY),
        list = list,
    )
}
