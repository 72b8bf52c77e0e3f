/// Tenant type definitions
///
/// A tenant is one customer organization. Its slug names the directory that
/// holds its database: `{data_dir}/{slug}/crm.db`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]{1,62}$").expect("slug pattern compiles"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tenant {
    pub id: i64,
    /// URL- and path-safe identifier (e.g. "acme", "north-wind")
    pub slug: String,
    /// Display name (e.g. "Acme Corporation")
    pub name: String,
    pub created_at: String,
}

impl Tenant {
    /// Whether `slug` may name a tenant directory
    pub fn is_valid_slug(slug: &str) -> bool {
        SLUG.is_match(slug)
    }

    pub fn database_path(&self) -> String {
        format!("{}/crm.db", self.slug)
    }
}
