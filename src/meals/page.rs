//! Server-rendered page with three mutually exclusive panels: meal data,
//! no data, error.

use super::dto::{Lunch, MealOutcome};

const NO_DATA_MESSAGE: &str = "해당 날짜의 급식정보가 없습니다.";
const NO_LUNCH_MESSAGE: &str = "중식 정보가 없습니다.";
const NO_MENU_MESSAGE: &str = "메뉴 정보가 없습니다.";

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
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

fn layout(date_value: &str, panel: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ko">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>급식 메뉴</title>
</head>
<body>
<h1>오늘의 급식</h1>
<form method="get" action="/">
<input type="date" id="dateInput" name="date" value="{date}">
<button type="submit" id="searchBtn">조회</button>
</form>
<section id="resultSection">
{panel}
</section>
</body>
</html>
"#,
        date = escape(date_value),
        panel = panel,
    )
}

fn lunch_items(lunch: Option<&Lunch>) -> String {
    let Some(lunch) = lunch else {
        return format!("<p>{NO_LUNCH_MESSAGE}</p>");
    };
    if lunch.dishes.is_empty() {
        return format!("<p>{NO_MENU_MESSAGE}</p>");
    }

    let mut html: String = lunch
        .dishes
        .iter()
        .map(|d| format!("<p>{}</p>\n", escape(d)))
        .collect();
    if !lunch.calories.is_empty() {
        html.push_str(&format!("<p class=\"calories\">{}</p>\n", escape(&lunch.calories)));
    }
    if !lunch.nutrition.is_empty() {
        html.push_str("<ul class=\"nutrition\">\n");
        for line in &lunch.nutrition {
            html.push_str(&format!("<li>{}</li>\n", escape(line)));
        }
        html.push_str("</ul>\n");
    }
    html
}

pub fn render_outcome(outcome: &MealOutcome) -> String {
    match outcome {
        MealOutcome::Served { date, display_date, lunch, .. } => {
            let panel = format!(
                "<div id=\"mealInfo\">\n<h2 id=\"mealDate\">{} 급식정보</h2>\n<div id=\"lunchItems\">\n{}</div>\n</div>",
                escape(display_date),
                lunch_items(lunch.as_ref()),
            );
            layout(date, &panel)
        }
        MealOutcome::NoData { date, .. } => {
            layout(date, &format!("<div id=\"noData\"><p>{NO_DATA_MESSAGE}</p></div>"))
        }
    }
}

pub fn render_error(date_value: &str, message: &str) -> String {
    layout(
        date_value,
        &format!("<div id=\"error\"><p>{}</p></div>", escape(message)),
    )
}
