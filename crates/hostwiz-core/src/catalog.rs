//! Static provider catalog

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::error::CoreError;
use crate::model::ProviderRecord;

/// Compile-time description of a built-in provider.
#[derive(Debug, Clone, Copy)]
struct ProviderSeed {
    id: &'static str,
    name: &'static str,
    logo: &'static str,
    price_range: &'static str,
    rating: f64,
    description: &'static str,
    pros: &'static [&'static str],
    cons: &'static [&'static str],
    best_for: &'static [&'static str],
    features: &'static [&'static str],
}

// Declaration order matters: it breaks score ties.
const BUILTIN_PROVIDERS: &[ProviderSeed] = &[
    ProviderSeed {
        id: "vercel",
        name: "Vercel",
        logo: "🚀",
        price_range: "Free - $20/month",
        rating: 4.8,
        description: "Perfect for modern web applications with excellent performance and developer experience.",
        pros: &["Instant deployments", "Global CDN", "Automatic scaling", "Great for React/Next.js"],
        cons: &["Limited backend capabilities", "Can be expensive for high traffic"],
        best_for: &["Frontend applications", "Static sites", "JAMstack", "Developer portfolios"],
        features: &["SSL Certificate", "CDN", "Git Integration", "24/7 Monitoring"],
    },
    ProviderSeed {
        id: "netlify",
        name: "Netlify",
        logo: "🌐",
        price_range: "Free - $45/month",
        rating: 4.7,
        description: "Excellent for static sites and JAMstack applications with powerful build tools.",
        pros: &["Easy deployment", "Form handling", "Split testing", "Great free tier"],
        cons: &["Limited for dynamic applications", "Build time limits"],
        best_for: &["Static sites", "Blogs", "Portfolio sites", "Small business sites"],
        features: &["SSL Certificate", "CDN", "Form Processing", "Analytics"],
    },
    ProviderSeed {
        id: "digitalocean",
        name: "DigitalOcean",
        logo: "🐙",
        price_range: "$5 - $100+/month",
        rating: 4.6,
        description: "Developer-friendly cloud platform with simple pricing and powerful features.",
        pros: &["Predictable pricing", "Great documentation", "SSD storage", "Global data centers"],
        cons: &["Requires technical knowledge", "No managed hosting"],
        best_for: &["Web applications", "APIs", "Databases", "Scalable projects"],
        features: &["Database Support", "Load Balancers", "24/7 Monitoring", "Backups"],
    },
    ProviderSeed {
        id: "bluehost",
        name: "Bluehost",
        logo: "🔵",
        price_range: "$3 - $30/month",
        rating: 4.2,
        description: "Beginner-friendly hosting with WordPress optimization and 24/7 support.",
        pros: &["WordPress optimized", "24/7 support", "Free domain", "Easy to use"],
        cons: &["Upselling", "Performance can vary", "Renewal prices higher"],
        best_for: &["WordPress sites", "Small businesses", "Beginners", "Blogs"],
        features: &["SSL Certificate", "Email Hosting", "One-click Installations", "Daily Backups"],
    },
    ProviderSeed {
        id: "aws",
        name: "AWS (Amazon Web Services)",
        logo: "☁️",
        price_range: "$5 - $500+/month",
        rating: 4.5,
        description: "Enterprise-grade cloud platform with unlimited scalability and comprehensive services.",
        pros: &["Unlimited scalability", "Comprehensive services", "High reliability", "Global infrastructure"],
        cons: &["Complex pricing", "Steep learning curve", "Can be expensive"],
        best_for: &["Enterprise applications", "High-traffic sites", "Complex architectures", "Global scale"],
        features: &["Database Support", "CDN", "Auto-scaling", "Advanced Security"],
    },
    ProviderSeed {
        id: "hostinger",
        name: "Hostinger",
        logo: "💜",
        price_range: "$1 - $15/month",
        rating: 4.3,
        description: "Affordable hosting with good performance and user-friendly control panel.",
        pros: &["Very affordable", "Good performance", "User-friendly", "Multiple data centers"],
        cons: &["Limited advanced features", "Support can be slow", "Renewal price increases"],
        best_for: &["Budget-conscious users", "Small websites", "Personal projects", "Learning"],
        features: &["SSL Certificate", "Email Hosting", "Website Builder", "Daily Backups"],
    },
];

impl ProviderSeed {
    fn to_record(self) -> ProviderRecord {
        fn owned(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }

        ProviderRecord {
            id: self.id.to_string(),
            name: self.name.to_string(),
            logo: self.logo.to_string(),
            price_range: self.price_range.to_string(),
            rating: self.rating,
            description: self.description.to_string(),
            pros: owned(self.pros),
            cons: owned(self.cons),
            best_for: owned(self.best_for),
            features: owned(self.features),
        }
    }
}

/// Read-only, ordered table of hosting providers.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderCatalog {
    providers: Vec<ProviderRecord>,
}

impl ProviderCatalog {
    /// Build a catalog from records, rejecting duplicate ids.
    ///
    /// An empty list is accepted here; consumers that need at least one
    /// provider check `is_empty` themselves.
    pub fn new(providers: Vec<ProviderRecord>) -> Result<Self, CoreError> {
        let mut seen = HashSet::new();
        for provider in &providers {
            if !seen.insert(provider.id.as_str()) {
                return Err(CoreError::DuplicateProvider(provider.id.clone()));
            }
        }
        Ok(Self { providers })
    }

    /// The six providers shipped with HostWiz.
    pub fn builtin() -> Self {
        Self {
            providers: BUILTIN_PROVIDERS.iter().map(|s| s.to_record()).collect(),
        }
    }

    /// Parse a JSON array of provider records.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let providers: Vec<ProviderRecord> = serde_json::from_str(json)?;
        if providers.is_empty() {
            return Err(CoreError::EmptyCatalog);
        }
        Self::new(providers)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CoreError::CatalogRead {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&content)?;
        debug!("Loaded {} providers from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    pub fn providers(&self) -> &[ProviderRecord] {
        &self.providers
    }

    /// The first `n` providers in declaration order.
    pub fn head(&self, n: usize) -> &[ProviderRecord] {
        &self.providers[..n.min(self.providers.len())]
    }

    pub fn get(&self, id: &str) -> Option<&ProviderRecord> {
        self.providers.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProviderRecord> {
        self.providers.iter()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for ProviderCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
