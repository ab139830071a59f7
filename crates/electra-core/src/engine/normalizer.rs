//! Speech-to-text repair: rewrites a raw question into canonical lowercase tokens.

use regex::Regex;
use std::sync::OnceLock;

/// Ordered correction table: (alternatives, canonical token).
///
/// Alternatives are tried leftmost-first, so a canonical token that is itself a prefix of
/// a variant ("content" vs "conten") is listed ahead of it and never re-expanded.
pub const CORRECTIONS: &[(&[&str], &str)] = &[
    (&["electra bot", "electra", "elektra", "electer", "electron"], "electra"),
    (&["college", "collage", "collate", "cold lead", "call lead"], "colead"),
    (&["co lead", "co-lead", "colead"], "colead"),
    (&["president", "presedent", "presidant", "prez"], "president"),
    (&["marketing", "marketting", "markting", "markiting"], "marketing"),
    (&["content", "contant", "conteant", "conten"], "content"),
    (&["creative", "creativ", "creatve"], "creative"),
    (&["hardware", "hard ware", "hardwere", "hardwar"], "hardware"),
    (&["software", "soft ware", "sofware", "sofwere", "softwar"], "software"),
    (&["leader", "head"], "lead"),
];

/// Upper bound on full passes over the table; real input settles in one or two.
const MAX_PASSES: usize = 4;

fn compiled() -> &'static [(Regex, &'static str)] {
    static TABLE: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        CORRECTIONS
            .iter()
            .filter_map(|(alternatives, canonical)| {
                let pattern = alternatives
                    .iter()
                    .map(|a| regex::escape(a))
                    .collect::<Vec<_>>()
                    .join("|");
                match Regex::new(&pattern) {
                    Ok(re) => Some((re, *canonical)),
                    Err(e) => {
                        tracing::error!(target: "electra::engine", canonical, error = %e, "Invalid correction pattern");
                        None
                    }
                }
            })
            .collect()
    })
}

fn single_pass(text: &str) -> String {
    let mut out = text.to_string();
    for (re, canonical) in compiled() {
        if re.is_match(&out) {
            out = re.replace_all(&out, *canonical).into_owned();
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercases, applies [`CORRECTIONS`] in order, collapses whitespace and trims.
///
/// Total and pure. The pass is repeated until the text is stable, so
/// `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let mut current = single_pass(&text.to_lowercase());
    for _ in 1..MAX_PASSES {
        let next = single_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_maps_to_its_canonical_token() {
        for (alternatives, canonical) in CORRECTIONS {
            for variant in *alternatives {
                assert_eq!(normalize(variant), *canonical, "variant {:?}", variant);
            }
        }
    }

    #[test]
    fn canonical_tokens_are_fixed_points() {
        for (_, canonical) in CORRECTIONS {
            assert_eq!(normalize(canonical), *canonical);
        }
    }

    #[test]
    fn lowercases_and_collapses_whitespace() {
        assert_eq!(normalize("  Who   IS the\tPREZ?  "), "who is the president?");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n "), "");
    }

    #[test]
    fn misheard_co_lead_becomes_colead() {
        assert_eq!(normalize("who is the software college"), "who is the software colead");
        assert_eq!(normalize("Hard ware cold lead"), "hardware colead");
        assert_eq!(normalize("co-lead of content"), "colead of content");
        assert_eq!(normalize("markting head"), "marketing lead");
    }

    #[test]
    fn whitespace_inside_a_variant_is_repaired_on_the_next_pass() {
        assert_eq!(normalize("software co   lead"), "software colead");
        assert_eq!(normalize("cold head"), "colead");
    }

    #[test]
    fn idempotent_on_mixed_input() {
        for input in [
            "Who is the Creativ Design head?",
            "tell me about elektra bot",
            "softwar leader and contant colead",
            "What is G Electra?",
            "asdfghjkl",
            "content creative hardware software",
        ] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input {:?}", input);
        }
    }

    #[test]
    fn canonical_words_are_not_stretched() {
        assert_eq!(normalize("content"), "content");
        assert_eq!(normalize("creative hardware software"), "creative hardware software");
    }
}
