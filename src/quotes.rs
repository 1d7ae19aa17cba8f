//! Deterministic flavor-text synthesis.
//!
//! Every article page carries a one-line benediction. Authored ones come from
//! the registry; for the rest, [`synthesize`] assembles one from fixed word
//! pools keyed by the article's slug:
//!
//! ```text
//! h        = Σ chars(slug)  mod (2³¹ − 1)
//! category = classify(slug)            → word bank (verbs, nouns)
//! quote    = “INVOCATIONS[h] {title} bank.verbs[h] within bank.nouns[h], CLOSURES[h]”
//! ```
//!
//! Each pool is indexed with `h mod len(pool)` independently, so pools of
//! different lengths land on different relative positions for the same hash.
//! There is no randomness anywhere: the same `(slug, title)` always yields
//! the same string as long as the pools below are unchanged.

use crate::taxonomy::Taxonomy;
use crate::types::ArticleRecord;
use std::borrow::Cow;

/// 2³¹ − 1, a Mersenne prime.
pub const HASH_MODULUS: u64 = 2_147_483_647;

/// Verb and noun phrases themed to one category.
#[derive(Debug)]
pub struct WordBank {
    pub key: &'static str,
    pub verbs: &'static [&'static str],
    pub nouns: &'static [&'static str],
}

pub const INVOCATIONS: &[&str] = &[
    "Praise be,",
    "Hear the litany:",
    "Behold,",
    "By the Motive Force,",
    "Let it be recorded:",
    "Glory to the Omnissiah,",
    "Attend, acolyte:",
];

pub const CLOSURES: &[&str] = &[
    "and the Machine Spirit is appeased.",
    "so decrees the Fabricator-General.",
    "that no cycle be squandered.",
    "as the Omnissiah wills.",
    "and entropy is held at bay.",
];

static BANKS: &[WordBank] = &[
    WordBank {
        key: "react",
        verbs: &[
            "stills the needless re-render",
            "binds the hooks in sanctified order",
            "shields each component",
            "guards the render-rites",
        ],
        nouns: &[
            "the reconciler's sacred tree",
            "the virtual DOM reliquary",
            "the component shrine",
        ],
    },
    WordBank {
        key: "next.js",
        verbs: &[
            "forges pages before the pilgrim arrives",
            "delivers only what the path requires",
            "hastens every route",
            "anoints each response",
        ],
        nouns: &[
            "the build-forge",
            "the edge cathedral",
            "the server-rendered sanctum",
            "the prefetch reliquary",
            "the route manifold",
        ],
    },
    WordBank {
        key: "performance",
        verbs: &[
            "purges the bloat",
            "tempers the signal",
            "reveals hidden weight",
        ],
        nouns: &[
            "the bundle's inner vault",
            "the cadence of the event stream",
            "the cache reliquary",
            "the profiler's gaze",
        ],
    },
    WordBank {
        key: "node.js",
        verbs: &[
            "keeps the event loop unblocked",
            "shields the server-forge",
            "divides the burden among acolytes",
            "purges lingering spirits",
            "rations the data-stream",
        ],
        nouns: &[
            "the eternal event loop",
            "the worker cloisters",
            "the heap sanctuary",
        ],
    },
    WordBank {
        key: "typescript",
        verbs: &[
            "seals every contract",
            "purges heresy before runtime",
            "carves types in steel",
        ],
        nouns: &["the compiler's judgement hall", "the schema tablets"],
    },
    WordBank {
        key: "python",
        verbs: &[
            "tames the serpent's concurrency",
            "conserves memory as holy oil",
            "yields only what is needed",
            "vectorizes the faithful arrays",
        ],
        nouns: &[
            "the interpreter's coils",
            "the asyncio cloister",
            "the serpent's den",
        ],
    },
    WordBank {
        key: "web-development-basics",
        verbs: &[
            "raises the sacred skeleton",
            "drapes the vestments of style",
            "breathes will into the page",
        ],
        nouns: &[
            "the document's bones",
            "the cascade of the stylesheets",
            "the browser's nave",
            "the acolyte's workshop",
        ],
    },
];

static MISC_BANK: WordBank = WordBank {
    key: crate::taxonomy::MISC_KEY,
    verbs: &[
        "serves the Machine Spirit",
        "honors the sacred circuits",
        "preserves the holy cycles",
    ],
    nouns: &[
        "the uncatalogued archives",
        "the data-vaults of Mars",
        "the noosphere",
        "the forge-world's memory",
    ],
};

/// Sum of the slug's character codes, reduced modulo [`HASH_MODULUS`] after
/// every addition, in the order the characters appear.
pub fn slug_hash(slug: &str) -> u64 {
    slug.chars()
        .fold(0, |acc, c| (acc + u64::from(c)) % HASH_MODULUS)
}

/// The word bank for a category key, falling back to the misc bank.
pub fn word_bank(category: &str) -> &'static WordBank {
    BANKS
        .iter()
        .find(|b| b.key == category)
        .unwrap_or(&MISC_BANK)
}

/// Pick `pool[h mod len]`.
fn pick(pool: &'static [&'static str], h: u64) -> &'static str {
    // Pools are non-empty constants, checked by tests.
    pool[(h % pool.len() as u64) as usize]
}

/// Synthesize a themed benediction for `(slug, title)`.
///
/// Total: any slug, registered or not, produces a well-formed line.
pub fn synthesize(taxonomy: &Taxonomy, slug: &str, title: &str) -> String {
    let h = slug_hash(slug);
    let bank = word_bank(taxonomy.classify(slug));
    format!(
        "\u{201C}{invocation} {title} {verb} within {noun}, {closure}\u{201D}",
        invocation = pick(INVOCATIONS, h),
        verb = pick(bank.verbs, h),
        noun = pick(bank.nouns, h),
        closure = pick(CLOSURES, h),
    )
}

/// The article's authored benediction, or a synthesized one if it has none.
pub fn authored_or_synthesized<'a>(taxonomy: &Taxonomy, article: &'a ArticleRecord) -> Cow<'a, str> {
    match &article.flavor_text {
        Some(text) => Cow::Borrowed(text.as_str()),
        None => Cow::Owned(synthesize(taxonomy, &article.slug, &article.title)),
    }
}
