use std::cmp::Ordering;

use crate::model::WordFragment;

pub fn cluster_lines(words: &[WordFragment], y_tolerance: f64) -> Vec<String> {
    let mut sorted = words.iter().collect::<Vec<&WordFragment>>();
    sorted.sort_by(|a, b| compare_reading_order(a, b));

    let mut lines = Vec::new();
    let mut current = Vec::<&WordFragment>::new();
    let mut running_y: Option<f64> = None;

    for word in sorted {
        match running_y {
            Some(y) if (word.y - y).abs() <= y_tolerance => {
                current.push(word);
                running_y = Some((y + word.y) / 2.0);
            }
            Some(_) => {
                lines.push(render_line(&mut current));
                current.push(word);
                running_y = Some(word.y);
            }
            None => {
                current.push(word);
                running_y = Some(word.y);
            }
        }
    }

    if !current.is_empty() {
        lines.push(render_line(&mut current));
    }

    lines
}

pub fn compare_reading_order(a: &WordFragment, b: &WordFragment) -> Ordering {
    a.y.total_cmp(&b.y).then(a.x0.total_cmp(&b.x0))
}

fn render_line(row: &mut Vec<&WordFragment>) -> String {
    row.sort_by(|a, b| a.x0.total_cmp(&b.x0));
    let line = row
        .iter()
        .map(|word| word.text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<&str>>()
        .join(" ");
    row.clear();
    line
}
