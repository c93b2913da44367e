//! Content agent panel: review queue and outbox.

use crate::actions::{Action, is_path_safe};
use crate::model::content::{ContentSnapshot, QueueItem};
use crate::utils::format::{self, truncate};

use super::widget::{Button, Card, Cell, Link, Stat, Table, Widget};

const CAPTION_PREVIEW: usize = 280;

pub fn queue(s: &ContentSnapshot) -> Widget {
    let stats = Widget::Stats(vec![
        Stat::new("Generated", Cell::count(s.stats.generated)),
        Stat::new("Approved", Cell::count(s.stats.approved)),
        Stat::new("Rejected", Cell::count(s.stats.rejected)),
        Stat::new("Posted", Cell::count(s.stats.posted)),
        Stat::new(
            "Approval rate",
            Cell::win_rate(s.stats.approved, s.stats.rejected),
        ),
        Stat::new(
            "Posted / generated",
            format::ratio(s.stats.posted, s.stats.generated, 2),
        ),
    ]);

    let cards = s.queue.iter().map(queue_card).collect();

    let outbox = s
        .outbox
        .iter()
        .map(|item| {
            vec![
                Cell::or_dash(&item.platform),
                Cell::or_dash(&item.title),
                Cell::or_dash(&item.created),
            ]
        })
        .collect();

    Widget::Stack(vec![
        stats,
        Widget::section(
            "Review queue",
            Widget::Cards {
                items: cards,
                empty: "Queue is empty",
            },
        ),
        Widget::section(
            "Outbox",
            Widget::Table(Table {
                columns: vec!["Platform", "Title", "Queued"],
                rows: outbox,
                empty: "Nothing waiting to post",
            }),
        ),
    ])
}

fn queue_card(item: &QueueItem) -> Card {
    let id = item.id.clone();
    let mut buttons = Vec::new();
    let mut links = Vec::new();

    if is_path_safe(&id) {
        match item.status.to_ascii_lowercase().as_str() {
            "pending" | "" => {
                buttons.push(Button::new("Generate", Action::SorenGenerate { id: id.clone() }));
            }
            "generated" => {
                buttons.push(Button::new("Approve", Action::SorenApprove { id: id.clone() }));
                buttons.push(Button::new("Reject", Action::SorenReject { id: id.clone() }));
            }
            _ => {}
        }
        if item.has_media {
            links.push(Link {
                label: "Preview",
                href: format!("/files/soren/preview/{id}"),
            });
            links.push(Link {
                label: "Download",
                href: format!("/files/soren/download/{id}"),
            });
        }
    }

    Card {
        title: if item.title.is_empty() {
            format!("#{}", item.id)
        } else {
            item.title.clone()
        },
        meta: vec![
            Cell::or_dash(&item.platform),
            Cell::status(&item.status),
            Cell::or_dash(&item.created),
        ],
        body: truncate(&item.caption, CAPTION_PREVIEW),
        buttons,
        links,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::lenient::parse;
    use crate::render::widget::render;
    use serde_json::json;

    fn snapshot() -> ContentSnapshot {
        parse(&json!({
            "stats": {"generated": 4, "approved": 3, "rejected": 1},
            "queue": [
                {"id": 1, "title": "Launch", "status": "generated", "caption": "<img src=x onerror=alert(1)>", "has_media": true},
                {"id": 2, "status": "pending"},
                {"id": "bad/id", "status": "generated"}
            ],
            "outbox": [{"platform": "x", "title": "Queued post"}]
        }))
    }

    #[test]
    fn generated_items_offer_review_buttons() {
        let html = render(&queue(&snapshot()));
        assert!(html.contains("&quot;soren-approve&quot;"));
        assert!(html.contains("&quot;soren-reject&quot;"));
        assert!(html.contains("&quot;soren-generate&quot;"));
        assert!(html.contains("/files/soren/preview/1"));
    }

    #[test]
    fn captions_are_escaped() {
        let html = render(&queue(&snapshot()));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn unsafe_ids_get_no_controls() {
        let card = queue_card(&QueueItem {
            id: "bad/id".into(),
            status: "generated".into(),
            has_media: true,
            ..Default::default()
        });
        assert!(card.buttons.is_empty());
        assert!(card.links.is_empty());
    }

    #[test]
    fn posted_ratio_guards_zero() {
        let html = render(&queue(&ContentSnapshot::default()));
        assert!(html.contains("Posted / generated</div><div class=\"stat-value\">--"));
        assert!(html.contains("Queue is empty"));
    }
}
