//! Category records read from the legacy catalog

use serde::{Deserialize, Serialize};

/// A category row from the legacy catalog.
///
/// `parent_id` of `None` or `0` marks a root category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceCategory {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announce: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

impl SourceCategory {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            slug: None,
            parent_id: None,
            announce: None,
            seo_title: None,
            seo_description: None,
            image_ref: None,
        }
    }

    /// Set the parent category id
    pub fn with_parent(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Set an explicit slug
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Set the announce text
    pub fn with_announce(mut self, announce: impl Into<String>) -> Self {
        self.announce = Some(announce.into());
        self
    }

    /// Parent category id, with the legacy `0` sentinel folded into `None`
    pub fn parent(&self) -> Option<i64> {
        self.parent_id.filter(|id| *id != 0)
    }

    pub fn is_root(&self) -> bool {
        self.parent().is_none()
    }

    /// Explicit slug, unchanged, if the row carries a non-blank one
    pub fn explicit_slug(&self) -> Option<&str> {
        self.slug
            .as_deref()
            .filter(|slug| !slug.trim().is_empty())
    }
}
