use querytube_protocol as proto;
use yew::prelude::*;

const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";
const NO_DESCRIPTION: &str = "No description available.";

/// Similarity as a whole percentage, rounding halves away from zero.
pub fn match_percent(score: f64) -> i64 {
    (score * 100.0).round() as i64
}

pub fn watch_url(video_id: &str) -> String {
    format!("{}{}", WATCH_URL_PREFIX, video_id)
}

/// Everything a result card shows, ready to render.
#[derive(Debug, PartialEq)]
pub struct Card<'a> {
    pub badge: String,
    pub thumbnail: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub watch_url: String,
    pub animation: String,
}

impl<'a> Card<'a> {
    pub fn new(index: usize, video: &'a proto::VideoResult) -> Card<'a> {
        let description = match video.description.as_deref() {
            None | Some("") => NO_DESCRIPTION,
            Some(text) => text,
        };
        Card {
            badge: format!("{}% Match", match_percent(video.score)),
            thumbnail: &video.thumbnail,
            title: &video.title,
            description,
            watch_url: watch_url(&video.video_id),
            // staggered entrance, one tenth of a second per card
            animation: format!("animation: fadeInUp 0.5s ease-out {}s backwards;", index as f64 / 10.0),
        }
    }

    // Fields go in as text nodes and attribute values, never as markup.
    pub fn view(&self) -> Html {
        html! {
            <div class="video-card" style={self.animation.clone()}>
                <div class="score-badge">{&self.badge}</div>
                <img src={self.thumbnail.to_string()} alt="thumbnail" />
                <div class="video-info">
                    <h3>{self.title}</h3>
                    <p>{self.description}</p>
                    <a href={self.watch_url.clone()} target="_blank" rel="noopener" class="video-btn">
                        <i class="fab fa-youtube"></i>{" Watch Now"}
                    </a>
                </div>
            </div>
        }
    }
}

/// Cards for `videos`, in the order given.
pub fn cards(videos: &[proto::VideoResult]) -> Vec<Card<'_>> {
    videos
        .iter()
        .enumerate()
        .map(|(index, video)| Card::new(index, video))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str, description: Option<&str>, score: f64) -> proto::VideoResult {
        proto::VideoResult {
            video_id: id.to_string(),
            title: format!("title {}", id),
            description: description.map(str::to_string),
            thumbnail: format!("{}.jpg", id),
            score,
        }
    }

    #[test]
    fn card_for_result_without_description() {
        let v = proto::VideoResult {
            video_id: "abc123".to_string(),
            title: "T".to_string(),
            description: None,
            thumbnail: "u.jpg".to_string(),
            score: 0.873,
        };
        let card = Card::new(0, &v);
        assert_eq!(card.badge, "87% Match");
        assert_eq!(card.description, "No description available.");
        assert!(card.watch_url.ends_with("abc123"));
        assert_eq!(card.watch_url, "https://www.youtube.com/watch?v=abc123");
        assert_eq!(card.thumbnail, "u.jpg");
        assert_eq!(card.title, "T");
    }

    #[test]
    fn empty_description_uses_placeholder() {
        let v = video("x", Some(""), 0.5);
        assert_eq!(Card::new(0, &v).description, NO_DESCRIPTION);
    }

    #[test]
    fn description_is_kept() {
        let v = video("x", Some("a talk about lifetimes"), 0.5);
        assert_eq!(Card::new(0, &v).description, "a talk about lifetimes");
    }

    #[test]
    fn percent_rounds_to_nearest() {
        assert_eq!(match_percent(0.0), 0);
        assert_eq!(match_percent(0.004), 0);
        assert_eq!(match_percent(0.126), 13);
        assert_eq!(match_percent(0.5), 50);
        assert_eq!(match_percent(1.0), 100);
    }

    #[test]
    fn markup_in_title_stays_text() {
        let v = proto::VideoResult {
            video_id: "x".to_string(),
            title: "<script>alert(1)</script>".to_string(),
            description: Some("<b>bold</b>".to_string()),
            thumbnail: "x.jpg".to_string(),
            score: 0.1,
        };
        let card = Card::new(0, &v);
        assert_eq!(card.title, "<script>alert(1)</script>");
        assert_eq!(card.description, "<b>bold</b>");
    }

    #[test]
    fn cards_follow_input_order_with_staggered_delay() {
        let videos = vec![video("c", None, 0.1), video("a", None, 0.9), video("b", None, 0.4)];
        let cards = cards(&videos);
        let urls: Vec<&str> = cards.iter().map(|c| c.watch_url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://www.youtube.com/watch?v=c",
                "https://www.youtube.com/watch?v=a",
                "https://www.youtube.com/watch?v=b",
            ]
        );
        assert_eq!(cards[0].animation, "animation: fadeInUp 0.5s ease-out 0s backwards;");
        assert_eq!(cards[2].animation, "animation: fadeInUp 0.5s ease-out 0.2s backwards;");
    }
}
