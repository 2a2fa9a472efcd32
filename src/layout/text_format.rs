use crate::layout::{DocumentLayout, PageColumns};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Section {
    Outside,
    Left,
    Right,
}

pub fn render_layout_text(layout: &DocumentLayout, sidebar_x: Option<f64>) -> String {
    let mut out = String::new();
    let sidebar = sidebar_x
        .map(|value| format!("{value}"))
        .unwrap_or_else(|| "none".to_string());

    for page in &layout.pages {
        out.push_str(&format!("\n--- PAGE {} ---\n", page.number));
        out.push_str("\n--- SETTINGS ---\n");
        out.push_str(&format!("SIDEBAR_X = {sidebar}\n"));
        out.push_str(&format!(
            "SPLIT_X   = {:.1}  ({})\n",
            page.split.x,
            page.split.mode.as_str()
        ));

        out.push_str("\n--- RESULTS LEFT ---\n");
        push_lines(&mut out, &page.columns.left);

        out.push_str("\n--- RESULTS RIGHT ---\n");
        push_lines(&mut out, &page.columns.right);
    }

    out
}

fn push_lines(out: &mut String, lines: &[String]) {
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
}

pub fn parse_layout_text(text: &str) -> Vec<PageColumns> {
    let mut pages = Vec::<PageColumns>::new();
    let mut section = Section::Outside;

    for raw in text.lines() {
        let line = raw.trim();

        if line.starts_with("--- PAGE") {
            pages.push(PageColumns::default());
            section = Section::Outside;
            continue;
        }
        if line.starts_with("--- SETTINGS") {
            section = Section::Outside;
            continue;
        }
        if line.starts_with("--- RESULTS LEFT") {
            section = Section::Left;
            continue;
        }
        if line.starts_with("--- RESULTS RIGHT") {
            section = Section::Right;
            continue;
        }
        if section == Section::Outside || line.is_empty() {
            continue;
        }

        if pages.is_empty() {
            pages.push(PageColumns::default());
        }
        let Some(page) = pages.last_mut() else {
            continue;
        };
        match section {
            Section::Left => page.left.push(line.to_string()),
            Section::Right => page.right.push(line.to_string()),
            Section::Outside => {}
        }
    }

    pages
}
