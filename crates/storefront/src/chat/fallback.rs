//! Deterministic local fallback responder.
//!
//! Used when the remote chat service is unreachable or not configured. The
//! classification is deliberately simple and fully deterministic so it can
//! be tested exactly:
//!
//! 1. full-match greetings -> fixed greeting, no recommendations
//! 2. full-match farewells -> fixed farewell, no recommendations
//! 3. fixed ordered keyword table; the first keyword contained in the
//!    lowercased message whose filter yields at least one catalog match
//!    wins (table order is the tie-break, not best match)
//! 4. default clarifying prompt with the first two catalog products

use walknex_core::{Category, Gender, ProductRef};

use crate::catalog::{Catalog, CatalogFilter};

const GREETINGS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "good morning",
    "good afternoon",
    "good evening",
];

const FAREWELLS: &[&str] = &["bye", "goodbye", "thanks", "thank you"];

const GREETING_REPLY: &str =
    "Hello! Welcome to Walknex. What kind of shoes are you looking for today?";

const FAREWELL_REPLY: &str = "Thank you for chatting with me! Have a great day.";

const DEFAULT_REPLY: &str = "I understand you're interested in finding the right shoes. \
                             Could you tell me more about what you're looking for?";

/// At most this many recommendations per reply.
const MAX_RECOMMENDATIONS: usize = 2;

/// The fixed keyword table, in precedence order.
const KEYWORDS: &[(&str, Option<Category>, Option<Gender>)] = &[
    ("running", Some(Category::Running), None),
    ("casual", Some(Category::Casual), None),
    ("boot", Some(Category::Boots), None),
    ("kids", None, Some(Gender::Kids)),
    ("women", None, Some(Gender::Women)),
    ("men", None, Some(Gender::Men)),
];

/// A fallback reply: message text plus up to two recommendations.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackReply {
    pub message: String,
    pub recommendations: Vec<ProductRef>,
}

/// Classify `message` against the catalog and produce a reply.
#[must_use]
pub fn fallback_response(catalog: &Catalog, message: &str) -> FallbackReply {
    let lowered = message.trim().to_lowercase();

    if GREETINGS.contains(&lowered.as_str()) {
        return FallbackReply {
            message: GREETING_REPLY.to_string(),
            recommendations: Vec::new(),
        };
    }

    if FAREWELLS.contains(&lowered.as_str()) {
        return FallbackReply {
            message: FAREWELL_REPLY.to_string(),
            recommendations: Vec::new(),
        };
    }

    for (keyword, category, gender) in KEYWORDS {
        if !lowered.contains(keyword) {
            continue;
        }
        let filter = CatalogFilter {
            category: *category,
            gender: *gender,
            search: None,
        };
        let recommendations = catalog.recommend(&filter, MAX_RECOMMENDATIONS);
        if !recommendations.is_empty() {
            return FallbackReply {
                message: format!("Here are some {keyword} shoes you might like:"),
                recommendations,
            };
        }
    }

    FallbackReply {
        message: DEFAULT_REPLY.to_string(),
        recommendations: catalog.recommend(&CatalogFilter::default(), MAX_RECOMMENDATIONS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use walknex_core::ProductId;

    #[test]
    fn test_greetings_full_match_only() {
        let catalog = Catalog::walknex_demo();

        for greeting in ["hello", "Hi", "HEY", "good morning", "  Good Evening  "] {
            let reply = fallback_response(&catalog, greeting);
            assert_eq!(reply.message, GREETING_REPLY, "for input {greeting:?}");
            assert!(reply.recommendations.is_empty());
        }

        // A greeting embedded in a longer message is not a greeting.
        let reply = fallback_response(&catalog, "hello, I need boots");
        assert_ne!(reply.message, GREETING_REPLY);
    }

    #[test]
    fn test_farewells_full_match() {
        let catalog = Catalog::walknex_demo();
        let reply = fallback_response(&catalog, "thank you");
        assert_eq!(reply.message, FAREWELL_REPLY);
        assert!(reply.recommendations.is_empty());
    }

    #[test]
    fn test_running_keyword_recommends_running_shoes() {
        let catalog = Catalog::walknex_demo();
        let reply = fallback_response(&catalog, "I need running shoes");

        assert_eq!(reply.message, "Here are some running shoes you might like:");
        assert!(reply.recommendations.len() <= 2);
        assert!(!reply.recommendations.is_empty());
        for rec in &reply.recommendations {
            let product = catalog.get(rec.id).expect("recommended product exists");
            assert_eq!(product.category, Category::Running);
        }
    }

    #[test]
    fn test_table_order_is_the_tie_break() {
        let catalog = Catalog::walknex_demo();

        // "running" precedes "women" in the table, so it wins even though
        // both keywords appear.
        let reply = fallback_response(&catalog, "running shoes for women please");
        assert_eq!(reply.message, "Here are some running shoes you might like:");

        // "women" precedes "men" in the table, and "women" contains "men";
        // table order keeps this unambiguous.
        let reply = fallback_response(&catalog, "shoes for women");
        assert_eq!(reply.message, "Here are some women shoes you might like:");
        for rec in &reply.recommendations {
            let product = catalog.get(rec.id).expect("recommended product exists");
            assert_eq!(product.gender, Gender::Women);
        }
    }

    #[test]
    fn test_keyword_with_no_matches_falls_through() {
        // A catalog with no boots: the "boot" keyword yields nothing, so the
        // scan falls through to the default reply.
        let catalog = Catalog::new(
            Catalog::walknex_demo()
                .products()
                .iter()
                .filter(|p| p.category != Category::Boots)
                .cloned()
                .collect(),
        );

        let reply = fallback_response(&catalog, "looking for a boot");
        assert_eq!(reply.message, DEFAULT_REPLY);
        assert_eq!(reply.recommendations.len(), 2);
    }

    #[test]
    fn test_default_reply_takes_first_two_in_catalog_order() {
        let catalog = Catalog::walknex_demo();
        let reply = fallback_response(&catalog, "what's the weather like?");

        assert_eq!(reply.message, DEFAULT_REPLY);
        assert_eq!(reply.recommendations.len(), 2);
        assert_eq!(reply.recommendations[0].id, ProductId::new(1));
        assert_eq!(reply.recommendations[1].id, ProductId::new(2));
    }

    #[test]
    fn test_classification_is_deterministic() {
        let catalog = Catalog::walknex_demo();
        let first = fallback_response(&catalog, "kids shoes");
        let second = fallback_response(&catalog, "kids shoes");
        assert_eq!(first, second);
    }
}
