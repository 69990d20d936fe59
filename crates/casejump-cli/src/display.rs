//! Terminal rendering for lookups, history, settings, and menus.

use casejump_core::catalog::{CATEGORY_ORDER, LAWS};
use casejump_core::menu::{MenuItem, MenuKind};
use casejump_core::{Classification, HistoryEntry, ResolvedTarget, Settings, WindowBounds};
use casejump_host::Response;
use casejump_verify::{Outcome, Verdict};

// ── Lookups ──

/// Print how a selection classifies and where it would go.
pub fn print_plan(selection: &str, classification: &Classification, target: &ResolvedTarget) {
    println!("=== {selection} ===");
    match classification {
        Classification::Article { law, article } => {
            println!("  {:<12} article", "kind");
            println!("  {:<12} {} ({})", "law", law.display_name, law.id);
            println!("  {:<12} {article}", "article");
        }
        Classification::Precedent { court, case_number } => {
            println!("  {:<12} precedent", "kind");
            println!("  {:<12} {}", "court", court.display_name());
            println!("  {:<12} {case_number}", "case");
        }
        Classification::NoMatch { raw_text } => {
            println!("  {:<12} search", "kind");
            println!("  {:<12} {raw_text}", "query");
        }
    }
    println!("  {:<12} {}", "url", target.candidate_url);
    println!("  {:<12} {}", "label", target.display_label);
    if target.requires_verification {
        println!("  {:<12} {}", "fallback", target.fallback_url);
    }
}

pub fn print_verdict(selection: &str, verdict: &Verdict) {
    let status = match &verdict.outcome {
        Outcome::NotRequired => "unchecked".to_string(),
        Outcome::Confirmed => "found".to_string(),
        Outcome::FellBack { reason } => format!("missing ({reason})"),
    };
    println!("{selection}");
    println!("  {:<12} {status}", "status");
    println!("  {:<12} {}", "url", verdict.url);
}

pub fn print_response(response: &Response) {
    match response {
        Response::Opened {
            window_id,
            url,
            label,
            verification,
        } => {
            println!("Opened in window {window_id} ({verification})");
            println!("  {label}");
            println!("  {url}");
        }
        Response::Pending { window_id, url } => {
            println!("Opened in window {window_id}, awaiting page report");
            println!("  {url}");
        }
        Response::Redirected { window_id, url } => {
            println!("Window {window_id} redirected to {url}");
        }
        Response::NotFound { message } => println!("{message}"),
        Response::Menus { items } => print_menu(items),
        Response::History { entries } => print_history(entries),
        Response::Settings { enabled, favorites } => print_settings(&Settings {
            enabled: enabled.clone(),
            favorites: favorites.clone(),
        }),
        Response::Ack => {}
        Response::Ignored { reason } => println!("Nothing to do: {reason}"),
        Response::Failed { message } => eprintln!("Error: {message}"),
    }
}

// ── State ──

pub fn print_history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("(no history)");
        return;
    }
    for (i, entry) in entries.iter().enumerate() {
        println!("{i:>2}  {}", entry.display_text);
        println!("    {}", entry.url);
    }
}

/// All statutes grouped by category, with enabled and favorite markers.
pub fn print_settings(settings: &Settings) {
    for category in CATEGORY_ORDER {
        println!("{}", category.label());
        for law in LAWS.iter().filter(|l| l.category == category) {
            let enabled = if settings.is_enabled(law.id) { "x" } else { " " };
            let star = if settings.favorites.iter().any(|f| f == law.id) {
                " ⭐"
            } else {
                ""
            };
            println!("  [{enabled}] {:<22} {}{star}", law.id, law.display_name);
        }
    }
}

/// Indented menu tree. Items arrive parent-first.
pub fn print_menu(items: &[MenuItem]) {
    for item in items {
        let depth = depth_of(items, item);
        let indent = "  ".repeat(depth);
        match item.kind {
            MenuKind::Separator => println!("{indent}────────"),
            MenuKind::Normal => println!("{indent}{:<28} [{}]", item.title, item.id),
        }
    }
}

fn depth_of(items: &[MenuItem], item: &MenuItem) -> usize {
    let mut depth = 0;
    let mut parent = item.parent_id.as_deref();
    while let Some(id) = parent {
        depth += 1;
        parent = items
            .iter()
            .find(|i| i.id == id)
            .and_then(|i| i.parent_id.as_deref());
    }
    depth
}

pub fn print_bounds(source: &str, bounds: WindowBounds) {
    println!("Popup placement ({source})");
    println!("  {:<12} {}", "left", bounds.left);
    println!("  {:<12} {}", "top", bounds.top);
    println!("  {:<12} {}", "width", bounds.width);
    println!("  {:<12} {}", "height", bounds.height);
}
