//! Server-rendered HTML for the dashboard pages.
//!
//! Four pages, small enough that a template engine would be overhead: each
//! one is a `format!` over escaped data, wrapped in a shared layout.

use llamagate_core::{ApiKey, DashboardStats, User};

use crate::dto::FlashParams;

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:0;background:#f5f6f8;color:#222}\
nav{background:#1f2430;color:#fff;padding:.6rem 1rem;display:flex;gap:1rem;align-items:center}\
nav a{color:#cfd6e4;text-decoration:none}\
nav .brand{font-weight:700;color:#fff}\
nav .user{margin-left:auto}\
main{max-width:60rem;margin:1.5rem auto;padding:0 1rem}\
table{border-collapse:collapse;width:100%;background:#fff}\
th,td{border:1px solid #dde1e8;padding:.4rem .6rem;text-align:left}\
.cards{display:flex;gap:1rem;margin:1rem 0}\
.card{background:#fff;border:1px solid #dde1e8;padding:1rem;flex:1}\
.card .num{display:block;font-size:1.6rem;font-weight:700}\
.flash.ok{background:#e6f6e6;border:1px solid #9ad29a;padding:.5rem}\
.flash.err{background:#fbe8e8;border:1px solid #e0a0a0;padding:.5rem}\
form.inline{margin:1rem 0;display:flex;gap:.5rem}\
label{display:block;margin:.8rem 0}\
input{padding:.35rem}\
button{padding:.35rem .8rem}\
code{font-size:.85em}";

/// Escape text for interpolation into HTML.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn layout(title: &str, nav_user: Option<&str>, body: &str) -> String {
    let nav = match nav_user {
        Some(username) => format!(
            "<nav><span class=\"brand\">llamagate</span>\
             <a href=\"/\">Dashboard</a>\
             <a href=\"/api-keys\">API Keys</a>\
             <a href=\"/users\">Users</a>\
             <span class=\"user\">{} &middot; <a href=\"/logout\">Logout</a></span></nav>",
            escape(username)
        ),
        None => String::new(),
    };
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} - llamagate</title>\n<style>{STYLE}</style>\n</head>\n\
         <body>\n{nav}\n<main>\n{body}\n</main>\n</body>\n</html>\n"
    )
}

fn flash_banner(flash: &FlashParams) -> String {
    let mut out = String::new();
    if let Some(message) = &flash.message {
        out.push_str(&format!(
            "<p class=\"flash ok\">{}</p>\n",
            escape(message)
        ));
    }
    if let Some(error) = &flash.error {
        out.push_str(&format!("<p class=\"flash err\">{}</p>\n", escape(error)));
    }
    out
}

fn last_used(key: &ApiKey) -> String {
    key.last_used.map_or_else(
        || "never".to_string(),
        |at| at.format("%Y-%m-%d %H:%M").to_string(),
    )
}

/// The login form, with an optional inline failure message.
pub fn login_page(error: Option<&str>) -> String {
    let banner = error
        .map(|e| format!("<p class=\"flash err\">{}</p>\n", escape(e)))
        .unwrap_or_default();
    let body = format!(
        "<h1>Sign in</h1>\n{banner}\
         <form method=\"post\" action=\"/login\">\n\
         <label>Username <input type=\"text\" name=\"username\" required></label>\n\
         <label>Password <input type=\"password\" name=\"password\" required></label>\n\
         <button type=\"submit\">Sign in</button>\n\
         </form>"
    );
    layout("Login", None, &body)
}

/// The dashboard: stat cards plus the recently used keys.
pub fn dashboard(username: &str, stats: &DashboardStats, recent: &[ApiKey]) -> String {
    let cards = format!(
        "<div class=\"cards\">\n\
         <div class=\"card\"><span class=\"num\">{}</span>API keys ({} active)</div>\n\
         <div class=\"card\"><span class=\"num\">{}</span>Users ({} active)</div>\n\
         <div class=\"card\"><span class=\"num\">{}</span>Requests today</div>\n\
         </div>",
        stats.total_api_keys,
        stats.active_api_keys,
        stats.total_users,
        stats.active_users,
        stats.requests_today
    );
    let rows: String = recent
        .iter()
        .map(|key| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&key.key_name),
                if key.is_active { "active" } else { "disabled" },
                last_used(key),
            )
        })
        .collect();
    let body = format!(
        "<h1>Dashboard</h1>\n{cards}\n<h2>Recent activity</h2>\n\
         <table>\n<tr><th>Key</th><th>Status</th><th>Last used</th></tr>\n{rows}</table>"
    );
    layout("Dashboard", Some(username), &body)
}

/// The key management page: create form, key table, toggle/delete scripts.
pub fn api_keys_page(username: &str, keys: &[ApiKey], flash: &FlashParams) -> String {
    let rows: String = keys
        .iter()
        .map(|key| {
            format!(
                "<tr><td>{id}</td><td>{name}</td><td><code>{secret}</code></td>\
                 <td>{status}</td><td>{created}</td><td>{last_used}</td>\
                 <td><button onclick=\"toggleKey({id}, {next_active})\">{toggle_label}</button> \
                 <button onclick=\"deleteKey({id})\">Delete</button></td></tr>\n",
                id = key.id,
                name = escape(&key.key_name),
                secret = escape(&key.api_key),
                status = if key.is_active { "active" } else { "disabled" },
                created = key.created_at.format("%Y-%m-%d %H:%M"),
                last_used = last_used(key),
                next_active = !key.is_active,
                toggle_label = if key.is_active { "Disable" } else { "Enable" },
            )
        })
        .collect();
    let body = format!(
        "<h1>API keys</h1>\n{flash}\
         <form method=\"post\" action=\"/api-keys\" class=\"inline\">\n\
         <input type=\"text\" name=\"key_name\" placeholder=\"Key name\" required>\n\
         <button type=\"submit\">Create key</button>\n\
         </form>\n\
         <table>\n<tr><th>ID</th><th>Name</th><th>Secret</th><th>Status</th>\
         <th>Created</th><th>Last used</th><th></th></tr>\n{rows}</table>\n\
         <script>\n\
         async function toggleKey(id, isActive) {{\n\
           await fetch('/api-keys/' + id, {{\n\
             method: 'PUT',\n\
             headers: {{'Content-Type': 'application/json'}},\n\
             body: JSON.stringify({{is_active: isActive}})\n\
           }});\n\
           location.reload();\n\
         }}\n\
         async function deleteKey(id) {{\n\
           if (!confirm('Delete this key?')) return;\n\
           await fetch('/api-keys/' + id, {{method: 'DELETE'}});\n\
           location.reload();\n\
         }}\n\
         </script>",
        flash = flash_banner(flash),
    );
    layout("API keys", Some(username), &body)
}

/// The user management page: create form plus the user table.
pub fn users_page(username: &str, users: &[User], flash: &FlashParams) -> String {
    let rows: String = users
        .iter()
        .map(|user| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                user.id,
                escape(&user.username),
                if user.is_active { "active" } else { "disabled" },
                user.created_at.format("%Y-%m-%d %H:%M"),
            )
        })
        .collect();
    let body = format!(
        "<h1>Users</h1>\n{flash}\
         <form method=\"post\" action=\"/users\" class=\"inline\">\n\
         <input type=\"text\" name=\"username\" placeholder=\"Username\" required>\n\
         <input type=\"password\" name=\"password\" placeholder=\"Password\" required>\n\
         <button type=\"submit\">Create user</button>\n\
         </form>\n\
         <table>\n<tr><th>ID</th><th>Username</th><th>Status</th><th>Created</th></tr>\n\
         {rows}</table>",
        flash = flash_banner(flash),
    );
    layout("Users", Some(username), &body)
}
