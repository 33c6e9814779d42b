//! Minimal server-side HTML for the listing, detail and status pages.
//!
//! Every string that came from the upstream goes through [`escape_html`].

use crate::domain::model::{CategoryFilter, EntityDetailBundle, ListingEntry, PageWindow};
use crate::web::state::SiteInfo;
use serde_json::Value;
use std::fmt::Write;

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Query-string encoding for a value placed in an `href`, before HTML escaping.
fn query_value(raw: &str) -> String {
    escape_html(&url::form_urlencoded::byte_serialize(raw.as_bytes()).collect::<String>())
}

fn header(site: &SiteInfo) -> String {
    format!(
        "<header><a href=\"/\"><img class=\"logo\" src=\"/{}\" alt=\"{}\"></a></header>\n",
        escape_html(site.logo.trim_start_matches('/')),
        escape_html(&site.title)
    )
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}

pub fn listing_page(
    site: &SiteInfo,
    filter: &CategoryFilter,
    entries: &[ListingEntry],
    window: &PageWindow,
) -> String {
    let mut body = header(site);
    let _ = writeln!(body, "<h1>{}</h1>", escape_html(&site.title));
    let _ = writeln!(
        body,
        "<p class=\"filter\">Filter: {} ({} Pokémon)</p>",
        escape_html(filter.as_query_value()),
        window.total
    );

    body.push_str("<ul class=\"listing\">\n");
    for entry in entries {
        let name = escape_html(&entry.name);
        let image = match &entry.image {
            Some(src) => format!("<img src=\"{}\" alt=\"{}\">", escape_html(src), name),
            None => String::new(),
        };
        let _ = writeln!(
            body,
            "<li><a href=\"/infos?pokemonName={}\">{}<span class=\"id\">#{}</span> {}</a></li>",
            query_value(&entry.name),
            image,
            entry.id,
            name
        );
    }
    body.push_str("</ul>\n");

    let type_of = query_value(filter.as_query_value());
    body.push_str("<nav class=\"pagination\">\n");
    if let Some(previous) = window.previous_offset() {
        let _ = writeln!(
            body,
            "<a rel=\"prev\" href=\"/?typeOf={}&amp;offset={}\">Previous</a>",
            type_of, previous
        );
    }
    let _ = writeln!(
        body,
        "<span>Page {} / {}</span>",
        window.current_page(),
        window.page_count()
    );
    if let Some(next) = window.next_offset() {
        let _ = writeln!(
            body,
            "<a rel=\"next\" href=\"/?typeOf={}&amp;offset={}\">Next</a>",
            type_of, next
        );
    }
    body.push_str("</nav>");

    layout(&site.title, &body)
}

pub fn detail_page(site: &SiteInfo, bundle: &EntityDetailBundle) -> String {
    let primary = &bundle.primary;
    let name = primary["name"].as_str().unwrap_or("unknown");

    let mut body = header(site);
    let _ = writeln!(body, "<h1>{}</h1>", escape_html(name));
    if let Some(id) = primary["id"].as_u64() {
        let _ = writeln!(body, "<p class=\"id\">#{}</p>", id);
    }
    if let Some(src) = primary.pointer("/sprites/front_default").and_then(Value::as_str) {
        let _ = writeln!(
            body,
            "<img src=\"{}\" alt=\"{}\">",
            escape_html(src),
            escape_html(name)
        );
    }

    let types: Vec<String> = primary["types"]
        .as_array()
        .map(|slots| {
            slots
                .iter()
                .filter_map(|slot| slot.pointer("/type/name").and_then(Value::as_str))
                .map(escape_html)
                .collect()
        })
        .unwrap_or_default();
    if !types.is_empty() {
        let _ = writeln!(body, "<p class=\"types\">{}</p>", types.join(" / "));
    }

    if let Some(text) = english_flavor_text(&bundle.species) {
        let _ = writeln!(body, "<p class=\"flavor\">{}</p>", escape_html(&text));
    }

    let mut stages = Vec::new();
    if let Some(chain) = bundle.evolution_chain.get("chain") {
        collect_stages(chain, &mut stages);
    }
    if !stages.is_empty() {
        body.push_str("<ol class=\"evolutions\">\n");
        for stage in &stages {
            let _ = writeln!(
                body,
                "<li><a href=\"/infos?pokemonName={}\">{}</a></li>",
                query_value(stage),
                escape_html(stage)
            );
        }
        body.push_str("</ol>\n");
    }

    let _ = write!(body, "<p><a href=\"/\">{}</a></p>", escape_html(&site.title));
    layout(&format!("{} - {}", site.title, name), &body)
}

pub fn no_info_page(site: &SiteInfo) -> String {
    layout(
        &site.title,
        &format!("<p class=\"no-info\">{}</p>", escape_html(&site.no_info_message)),
    )
}

pub fn not_found_page() -> String {
    layout("404", "<h1>404</h1>\n<p>This page does not exist.</p>")
}

pub fn server_error_page() -> String {
    layout(
        "500",
        "<h1>500</h1>\n<p>Something went wrong while loading the Pokédex. Please try again later.</p>",
    )
}

fn english_flavor_text(species: &Value) -> Option<String> {
    species["flavor_text_entries"]
        .as_array()?
        .iter()
        .find(|entry| entry.pointer("/language/name").and_then(Value::as_str) == Some("en"))
        .and_then(|entry| entry["flavor_text"].as_str())
        .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Depth-first walk of an evolution chain node: `{ species: { name }, evolves_to: [...] }`.
fn collect_stages(node: &Value, stages: &mut Vec<String>) {
    if let Some(name) = node.pointer("/species/name").and_then(Value::as_str) {
        stages.push(name.to_string());
    }
    if let Some(children) = node["evolves_to"].as_array() {
        for child in children {
            collect_stages(child, stages);
        }
    }
}
