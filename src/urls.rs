//! URL building for redirects and outbound links

use url::Url;
use crate::config::ServerConfig;
use crate::utils::errors::Result;

/// Builds the paths of every route the handlers redirect to or link at
#[derive(Debug, Clone)]
pub struct Urls {
    base: Url,
    prefix: String,
    club_prefix: String,
}

fn mount_point(prefix: &str) -> String {
    prefix.trim_end_matches('/').to_string()
}

impl Urls {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        Ok(Self {
            base: Url::parse(&config.public_base_url)?,
            prefix: mount_point(&config.url_prefix),
            club_prefix: mount_point(&config.club_prefix),
        })
    }

    /// Mount point of the question routes, empty when mounted at the root
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn questions(&self) -> String {
        format!("{}/questions", self.prefix)
    }

    pub fn question_info(&self, question_id: i64) -> String {
        format!("{}/{}/info", self.prefix, question_id)
    }

    pub fn delete_answer(&self, answer_id: i64) -> String {
        format!("{}/answer/{}/_delete", self.prefix, answer_id)
    }

    pub fn club_info(&self, club_id: i64) -> String {
        format!("{}/{}/info", self.club_prefix, club_id)
    }

    /// Absolute form of a site path, for links that leave the site
    pub fn external(&self, path: &str) -> Result<String> {
        let joined = format!("{}{}", self.base.as_str().trim_end_matches('/'), path);
        Ok(Url::parse(&joined)?.to_string())
    }
}
