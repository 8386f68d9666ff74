//! Document information dictionary (`/Info` in the trailer).

use super::document::Document;
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::object::ObjectId;
use chrono::{DateTime, Local};

/// Format a date the way `/CreationDate` and `/ModDate` expect it.
pub fn pdf_date(date: &DateTime<Local>) -> String {
    date.format("D:%Y%m%d%H%M%S").to_string()
}

impl Document {
    /// Info dictionary, created on first use with the current time as
    /// creation and modification date.
    pub fn info(&mut self) -> Result<ObjectId> {
        if let Some(info) = self.info {
            return Ok(info);
        }
        let now = pdf_date(&Local::now());
        let mut dict = Dictionary::new();
        dict.add_pdf_string("CreationDate", &now)?;
        dict.add_pdf_string("ModDate", &now)?;
        dict.add_pdf_string("Creator", env!("CARGO_PKG_NAME"))?;
        dict.add_pdf_string("Producer", &self.config.producer)?;
        let id = self.add_object(dict);
        self.info = Some(id);
        Ok(id)
    }

    fn set_info_text(&mut self, key: &str, value: &str) -> Result<()> {
        let info = self.info()?;
        self.object_mut(info)?.dict.add_pdf_string(key, value)
    }

    /// Document title.
    pub fn set_title(&mut self, title: &str) -> Result<()> {
        self.set_info_text("Title", title)
    }

    /// Document author.
    pub fn set_author(&mut self, author: &str) -> Result<()> {
        self.set_info_text("Author", author)
    }

    /// Document subject.
    pub fn set_subject(&mut self, subject: &str) -> Result<()> {
        self.set_info_text("Subject", subject)
    }

    /// Keywords.
    pub fn set_keywords(&mut self, keywords: &str) -> Result<()> {
        self.set_info_text("Keywords", keywords)
    }

    /// Application that created the original content.
    pub fn set_creator(&mut self, creator: &str) -> Result<()> {
        self.set_info_text("Creator", creator)
    }

    /// Application that produced the file.
    pub fn set_producer(&mut self, producer: &str) -> Result<()> {
        self.set_info_text("Producer", producer)
    }

    /// Override the creation date.
    pub fn set_creation_date(&mut self, date: DateTime<Local>) -> Result<()> {
        self.set_info_text("CreationDate", &pdf_date(&date))
    }

    /// Override the modification date.
    pub fn set_modification_date(&mut self, date: DateTime<Local>) -> Result<()> {
        self.set_info_text("ModDate", &pdf_date(&date))
    }
}
