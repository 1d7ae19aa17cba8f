//! Category taxonomy and the slug classifier.
//!
//! The taxonomy is an ordered list of categories, each owning a fixed,
//! hand-authored list of member slugs. Classification is a linear scan in
//! that order: the first category whose list contains the slug wins, and a
//! slug found nowhere lands in the implicit [`MISC_KEY`] bucket.
//!
//! ```text
//! react → next.js → performance → node.js → typescript → python → web-development-basics → misc
//! ```
//!
//! Member lists may name slugs that have no article yet. The registry skips
//! those when building listings and `check` reports them as pending.

/// Key of the implicit fallback category.
pub const MISC_KEY: &str = "misc";

/// A named grouping of article slugs, plus the display metadata shown on
/// its listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// URL-safe key, also the classifier's return value (`next.js`)
    pub key: &'static str,
    /// Display name used in navigation (`Next.js`)
    pub name: &'static str,
    /// Heading on the category page
    pub ritual: &'static str,
    pub description: &'static str,
    /// Technology labels shown as chips on the category page
    pub technologies: &'static [&'static str],
    /// Member slugs in display order
    pub slugs: &'static [&'static str],
}

impl Category {
    /// The fallback bucket for slugs that no table claims.
    pub const MISC: Category = Category {
        key: MISC_KEY,
        name: "Miscellanea",
        ritual: "Ritual of Uncatalogued Lore",
        description: "Scrolls not yet assigned to a sacred domain. The Tech-Priests have inscribed them, but their place in the archives awaits judgement.",
        technologies: &[],
        slugs: &[],
    };

    pub fn contains(&self, slug: &str) -> bool {
        self.slugs.iter().any(|s| *s == slug)
    }

    pub fn is_misc(&self) -> bool {
        self.key == MISC_KEY
    }
}

/// An ordered set of category tables.
///
/// Cheap to copy; the tables themselves are `'static`.
#[derive(Debug, Clone, Copy)]
pub struct Taxonomy {
    categories: &'static [Category],
}

impl Taxonomy {
    pub const fn new(categories: &'static [Category]) -> Self {
        Self { categories }
    }

    /// The canonical taxonomy used by the site.
    pub const fn standard() -> Self {
        Self::new(STANDARD)
    }

    /// Categories in check order, excluding `misc`.
    pub fn categories(&self) -> &'static [Category] {
        self.categories
    }

    /// Map a slug to exactly one category key.
    ///
    /// Total: any input, including the empty string, yields a key. If a slug
    /// appears in more than one table the earliest table wins.
    pub fn classify(&self, slug: &str) -> &'static str {
        self.categories
            .iter()
            .find(|c| c.contains(slug))
            .map(|c| c.key)
            .unwrap_or(MISC_KEY)
    }

    /// Look up a category by key. `misc` resolves to [`Category::MISC`].
    pub fn category(&self, key: &str) -> Option<&Category> {
        if key == MISC_KEY {
            return Some(&Category::MISC);
        }
        self.categories.iter().find(|c| c.key == key)
    }

    /// The category a slug classifies into.
    pub fn category_of(&self, slug: &str) -> &Category {
        self.categories
            .iter()
            .find(|c| c.contains(slug))
            .unwrap_or(&Category::MISC)
    }

    /// Slugs listed by more than one table, with the winning and the
    /// shadowed category keys.
    pub fn overlaps(&self) -> Vec<(&'static str, &'static str, &'static str)> {
        let mut found = Vec::new();
        for (i, winner) in self.categories.iter().enumerate() {
            for later in &self.categories[i + 1..] {
                for slug in winner.slugs.iter().filter(|s| later.contains(s)) {
                    found.push((*slug, winner.key, later.key));
                }
            }
        }
        found
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::standard()
    }
}

/// Classify a slug against the standard taxonomy.
pub fn classify(slug: &str) -> &'static str {
    Taxonomy::standard().classify(slug)
}

static STANDARD: &[Category] = &[
    Category {
        key: "react",
        name: "React",
        ritual: "Ritual of Component Sanctification",
        description: "Learn the ancient arts of React optimization, where components are blessed with the sacred shield of memoization and hooks flow like the sacred data streams of the Omnissiah.",
        technologies: &[
            "React.memo",
            "useMemo & useCallback",
            "Lazy Loading",
            "Virtualization",
            "Error Boundaries",
            "Concurrent Features",
            "Server Components",
        ],
        slugs: &[
            "react-memo",
            "usememo-usecallback",
            "lazy-loading",
            "virtualization",
            "lazy-hydration",
            "error-boundaries",
            "react-concurrent-features",
            "react-server-components",
        ],
    },
    Category {
        key: "next.js",
        name: "Next.js",
        ritual: "Ritual of Server-Side Sanctification",
        description: "Embrace the power of Next.js, where pages are pre-rendered in the sacred forges and delivered with the swiftness of a discharged plasma bolt.",
        technologies: &[
            "Code Splitting",
            "Image Optimization",
            "SSR Caching",
            "Static Generation",
            "Prefetching",
            "Streaming",
            "Partial Prerendering",
        ],
        slugs: &[
            "code-splitting",
            "image-optimization",
            "ssr-caching",
            "static-generation",
            "prefetching",
            "static-assets-caching",
            "nextjs-streaming",
            "nextjs-partial-prerendering",
        ],
    },
    Category {
        key: "performance",
        name: "Performance",
        ritual: "Ritual of Performance Purification",
        description: "Purge the bloat from your bundles and optimize your code with the precision of the Omnissiah's chosen tools.",
        technologies: &[
            "Bundle Analysis",
            "Throttling & Debouncing",
            "SWR/React Query",
            "Static Asset Caching",
        ],
        slugs: &["throttling-debouncing", "use-swr", "bundle-analyzer"],
    },
    Category {
        key: "node.js",
        name: "Node.js",
        ritual: "Ritual of Server Optimization",
        description: "Command the server spirits with the wisdom of the Omnissiah, ensuring your APIs serve with the reliability of sacred cogitators.",
        technologies: &[
            "API Pagination",
            "Rate Limiting",
            "Event Loop Awareness",
            "Memory Leak Prevention",
            "Worker Threads",
            "Cluster Optimization",
        ],
        slugs: &[
            "api-pagination",
            "api-rate-limiting",
            "node-event-loop",
            "js-memory-leaks",
            "serverless-architecture",
            "nodejs-worker-threads",
            "nodejs-cluster-optimization",
        ],
    },
    Category {
        key: "typescript",
        name: "TypeScript",
        ritual: "Ritual of Type Sanctification",
        description: "Let the strict compiler be your relentless sentinel, purging errors before they dare manifest in your blessed code.",
        technologies: &[
            "Strict TypeScript Settings",
            "Satisfies Operator",
            "Template Literal Types",
        ],
        slugs: &[
            "typescript-strictness",
            "typescript-satisfies-operator",
            "typescript-template-literal-types",
        ],
    },
    Category {
        key: "python",
        name: "Python",
        ritual: "Ritual of Python Optimization",
        description: "Channel the power of Python with the wisdom of the Tech-Priests, where async spirits flow and memory is conserved like sacred energy.",
        technologies: &[
            "Async/Await Optimization",
            "Memory Optimization",
            "Efficient Data Structures",
            "Profiling",
            "NumPy Optimization",
            "Multiprocessing",
        ],
        slugs: &[
            "python-async-optimization",
            "python-memory-optimization",
            "python-efficient-data-structures",
            "python-profiling-performance",
            "python-numpy-optimization",
            "python-multiprocessing-threading",
            "python-generators-lazy-evaluation",
        ],
    },
    Category {
        key: "web-development-basics",
        name: "Web Development Basics",
        ritual: "Ritual of Web Enlightenment",
        description: "Begin your sacred journey through the digital realms, mastering each step from the foundational markup to the advanced server architectures.",
        technologies: &[
            "HTML Fundamentals",
            "CSS Mastery",
            "JavaScript Essentials",
            "Development Tools",
            "Modern Frameworks",
            "Backend Development",
            "Portfolio Building",
        ],
        slugs: &[
            "web-fundamentals-html",
            "web-fundamentals-css",
            "web-fundamentals-javascript",
            "web-development-tools",
            "web-development-frameworks",
            "web-development-backend",
            "web-development-practice",
        ],
    },
];
