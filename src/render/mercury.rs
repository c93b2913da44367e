//! Brand-safety reviewer panels.

use crate::actions::{Action, is_path_safe};
use crate::model::review::{Knowledge, Plan, Review, ReviewSnapshot};
use crate::utils::format::{PLACEHOLDER, truncate};

use super::widget::{Button, Card, Cell, Stat, Table, Tone, Widget};

const POST_PREVIEW: usize = 200;

pub fn posts(s: &ReviewSnapshot) -> Widget {
    let reviews = s.review_queue.iter().map(review_card).collect();
    let recent = s
        .recent_posts
        .iter()
        .map(|p| {
            vec![
                Cell::or_dash(&p.platform),
                Cell::from(truncate(&p.text, 120)),
                Cell::or_dash(&p.posted_at),
                Cell::count(p.engagement),
            ]
        })
        .collect();

    let mut review_controls = Vec::new();
    if !s.review_queue.is_empty() {
        review_controls.push(Button::new("Review all", Action::MercuryReviewAll));
    }

    Widget::Stack(vec![
        Widget::Stats(vec![
            Stat::new("Posts today", Cell::count(s.posts_today)),
            Stat::new("Posts total", Cell::count(s.posts_total)),
            Stat::new("Awaiting review", s.review_queue.len().to_string()),
        ]),
        Widget::section(
            "Review queue",
            Widget::Stack(vec![
                Widget::Buttons(review_controls),
                Widget::Cards {
                    items: reviews,
                    empty: "Nothing awaiting review",
                },
            ]),
        ),
        Widget::section(
            "Recent posts",
            Widget::Table(Table {
                columns: vec!["Platform", "Post", "Posted", "Engagement"],
                rows: recent,
                empty: "No posts yet",
            }),
        ),
    ])
}

fn review_card(r: &Review) -> Card {
    let score = match r.score {
        Some(score) => Cell::new(format!("score {score:.0}"), Tone::from_win_rate(score)),
        None => Cell::new(format!("score {PLACEHOLDER}"), Tone::Muted),
    };
    let buttons = if is_path_safe(&r.id) {
        vec![
            Button::new("Review", Action::MercuryReview { id: r.id.clone() }),
            Button::new(
                "Reply",
                Action::MercuryReply {
                    id: r.id.clone(),
                    text: String::new(),
                },
            )
            .with_prompt("Reply text"),
        ]
    } else {
        Vec::new()
    };

    Card {
        title: if r.platform.is_empty() {
            "Post".into()
        } else {
            r.platform.clone()
        },
        meta: vec![score, Cell::status(&r.verdict)],
        body: truncate(&r.text, POST_PREVIEW),
        buttons,
        links: Vec::new(),
    }
}

pub fn plan(p: &Plan) -> Widget {
    Widget::Table(Table {
        columns: vec!["Day", "Platform", "Topic", "Status"],
        rows: p
            .plan
            .iter()
            .map(|e| {
                vec![
                    Cell::or_dash(&e.day),
                    Cell::or_dash(&e.platform),
                    Cell::or_dash(&e.topic),
                    Cell::status(&e.status),
                ]
            })
            .collect(),
        empty: "No posting plan",
    })
}

pub fn knowledge(k: &Knowledge) -> Widget {
    let total = if k.total > 0.0 {
        k.total
    } else {
        k.entries.len() as f64
    };
    Widget::Stack(vec![
        Widget::Stats(vec![Stat::new("Entries", Cell::count(total))]),
        Widget::Table(Table {
            columns: vec!["Topic", "Insight"],
            rows: k
                .entries
                .iter()
                .map(|e| vec![Cell::or_dash(&e.topic), Cell::from(truncate(&e.insight, 240))])
                .collect(),
            empty: "Knowledge base is empty",
        }),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::lenient::parse;
    use crate::render::widget::render;
    use serde_json::json;

    #[test]
    fn reply_button_prompts_for_text() {
        let s: ReviewSnapshot = parse(&json!({"review_queue": [
            {"id": "r1", "platform": "x", "text": "hello", "score": 82}
        ]}));
        let html = render(&posts(&s));
        assert!(html.contains(r#"data-prompt="Reply text""#));
        assert!(html.contains("&quot;mercury-review-all&quot;"));
        assert!(html.contains(r#"<span class="good">score 82</span>"#));
    }

    #[test]
    fn empty_queue_has_no_review_all() {
        let html = render(&posts(&ReviewSnapshot::default()));
        assert!(!html.contains("mercury-review-all"));
        assert!(html.contains("Nothing awaiting review"));
    }

    #[test]
    fn knowledge_total_falls_back_to_entry_count() {
        let k: Knowledge = parse(&json!({"entries": [{"topic": "tone"}, {"topic": "hashtags"}]}));
        let html = render(&knowledge(&k));
        assert!(html.contains("Entries</div><div class=\"stat-value\">2"));
    }
}
