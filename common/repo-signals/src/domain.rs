//! Application domain classification
//!
//! Scores free text about a repository (name, description, topics) against a
//! fixed table of keyword sets and returns the most likely domain.

use serde::Serialize;

/// Minimum cumulative weight for a confident classification
const MIN_CONFIDENCE: u32 = 2;

/// A coarse category of software purpose
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Domain {
    pub key: &'static str,
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

impl Domain {
    /// Whether any keyword appears in the (lower-cased) text
    pub fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|k| text.contains(k))
    }

    /// Number of keywords appearing in the (lower-cased) text
    pub fn keyword_hits(&self, text: &str) -> usize {
        self.keywords.iter().filter(|k| text.contains(*k)).count()
    }

    fn weight(&self, text: &str) -> u32 {
        self.keywords
            .iter()
            .filter(|k| text.contains(*k))
            .map(|k| keyword_weight(k))
            .sum()
    }
}

fn keyword_weight(keyword: &str) -> u32 {
    match keyword.len() {
        n if n > 10 => 3,
        n if n > 5 => 2,
        _ => 1,
    }
}

/// Lower-cased `name description topics...` haystack for keyword matching
pub fn search_text(name: &str, description: Option<&str>, topics: &[String]) -> String {
    format!(
        "{} {} {}",
        name,
        description.unwrap_or(""),
        topics.join(" ")
    )
    .to_lowercase()
}

/// Classify repository text into one of [`DOMAINS`]
///
/// Returns the strictly highest-scoring domain (earlier table entries win
/// ties) when its weight reaches the confidence floor.
pub fn classify(
    name: &str,
    description: Option<&str>,
    topics: &[String],
) -> Option<&'static Domain> {
    let text = search_text(name, description, topics);

    let mut best: Option<&'static Domain> = None;
    let mut best_score = 0;
    for domain in DOMAINS {
        let score = domain.weight(&text);
        if score > best_score {
            best_score = score;
            best = Some(domain);
        }
    }

    if best_score >= MIN_CONFIDENCE {
        best
    } else {
        None
    }
}

/// Domain table, in tie-break order
pub static DOMAINS: &[Domain] = &[
    Domain {
        key: "chatbot",
        name: "Chatbot",
        keywords: &[
            "chatbot",
            "chat bot",
            "conversational ai",
            "nlp",
            "natural language",
            "assistant",
            "virtual assistant",
            "ai assistant",
            "conversation",
            "dialogue",
            "chat",
            "messaging bot",
            "discord bot",
            "telegram bot",
            "slack bot",
        ],
    },
    Domain {
        key: "ecommerce",
        name: "E-commerce",
        keywords: &[
            "ecommerce",
            "e-commerce",
            "online store",
            "shopping cart",
            "payment",
            "checkout",
            "product catalog",
            "inventory",
            "order management",
            "marketplace",
            "shop",
            "store",
            "retail",
            "pos",
            "point of sale",
            "billing",
            "subscription",
        ],
    },
    Domain {
        key: "social",
        name: "Social Media",
        keywords: &[
            "social media",
            "social network",
            "facebook",
            "twitter",
            "instagram",
            "linkedin",
            "social platform",
            "community",
            "user profile",
            "friends",
            "followers",
            "posts",
            "feed",
            "timeline",
            "messaging",
            "chat",
        ],
    },
    Domain {
        key: "blog",
        name: "Blog/CMS",
        keywords: &[
            "blog",
            "cms",
            "content management",
            "article",
            "post",
            "editor",
            "publishing",
            "wordpress",
            "markdown",
            "static site",
            "documentation",
            "news",
            "journal",
        ],
    },
    Domain {
        key: "game",
        name: "Gaming",
        keywords: &[
            "game",
            "gaming",
            "player",
            "score",
            "level",
            "puzzle",
            "arcade",
            "multiplayer",
            "single player",
            "board game",
            "card game",
            "strategy",
            "adventure",
            "rpg",
            "simulation",
        ],
    },
    Domain {
        key: "education",
        name: "Education",
        keywords: &[
            "education",
            "learning",
            "course",
            "tutorial",
            "lesson",
            "student",
            "teacher",
            "academy",
            "school",
            "university",
            "training",
            "quiz",
            "exam",
            "certificate",
            "mooc",
            "elearning",
        ],
    },
    Domain {
        key: "finance",
        name: "Finance",
        keywords: &[
            "finance",
            "financial",
            "banking",
            "payment",
            "wallet",
            "cryptocurrency",
            "crypto",
            "bitcoin",
            "trading",
            "investment",
            "portfolio",
            "budget",
            "expense",
            "accounting",
            "invoice",
            "billing",
        ],
    },
    Domain {
        key: "healthcare",
        name: "Healthcare",
        keywords: &[
            "healthcare",
            "medical",
            "health",
            "patient",
            "doctor",
            "hospital",
            "clinic",
            "diagnosis",
            "treatment",
            "medicine",
            "pharmacy",
            "fitness",
            "wellness",
            "therapy",
            "appointment",
        ],
    },
    Domain {
        key: "productivity",
        name: "Productivity",
        keywords: &[
            "productivity",
            "task",
            "todo",
            "project management",
            "calendar",
            "schedule",
            "reminder",
            "note",
            "organizer",
            "planner",
            "time tracking",
            "workflow",
            "automation",
            "efficiency",
        ],
    },
    Domain {
        key: "entertainment",
        name: "Entertainment",
        keywords: &[
            "entertainment",
            "music",
            "video",
            "movie",
            "streaming",
            "player",
            "media",
            "audio",
            "video player",
            "playlist",
            "radio",
            "podcast",
            "gallery",
            "photo",
            "image",
        ],
    },
    Domain {
        key: "developer",
        name: "Developer Tools",
        keywords: &[
            "developer",
            "dev tools",
            "api",
            "sdk",
            "library",
            "framework",
            "cli",
            "command line",
            "debug",
            "testing",
            "deployment",
            "ci/cd",
            "docker",
            "kubernetes",
            "monitoring",
        ],
    },
    Domain {
        key: "analytics",
        name: "Analytics",
        keywords: &[
            "analytics",
            "dashboard",
            "metrics",
            "statistics",
            "chart",
            "graph",
            "data visualization",
            "reporting",
            "kpi",
            "tracking",
            "monitoring",
            "insights",
            "business intelligence",
        ],
    },
];
