// tests/common/mod.rs
//! Shared fixtures: page builders and in-process collaborators that count
//! how often they are called.
#![allow(dead_code)]

use notion2html::{
    AppError, Block, BlockCommon, BulletedListItemBlock, CallerIdentity, CredentialValidator,
    Heading1Block, Heading2Block, Heading3Block, LookupRecord, NotionRepository, Page, PageId,
    PageLookup, PageTitle, ParagraphBlock, RichTextItem, TextBlockContent, UnsupportedBlock,
    UserEmail,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const GOOD_TOKEN: &str = "good-token";
pub const ALICE: &str = "alice@example.com";
pub const ALICE_PAGE: &str = "11111111111111111111111111111111";

pub fn spans(text: &str) -> TextBlockContent {
    TextBlockContent::new(vec![RichTextItem::plain_text(text)])
}

pub fn paragraph(text: &str) -> Block {
    Block::Paragraph(ParagraphBlock {
        common: BlockCommon::default(),
        content: spans(text),
    })
}

pub fn heading1(text: &str) -> Block {
    Block::Heading1(Heading1Block {
        common: BlockCommon::default(),
        content: spans(text),
    })
}

pub fn heading2(text: &str) -> Block {
    Block::Heading2(Heading2Block {
        common: BlockCommon::default(),
        content: spans(text),
    })
}

pub fn heading3(text: &str) -> Block {
    Block::Heading3(Heading3Block {
        common: BlockCommon::default(),
        content: spans(text),
    })
}

pub fn bulleted(text: &str) -> Block {
    Block::BulletedListItem(BulletedListItemBlock {
        common: BlockCommon::default(),
        content: spans(text),
    })
}

pub fn unsupported(tag: &str) -> Block {
    Block::Unsupported(UnsupportedBlock {
        common: BlockCommon::default(),
        block_type: tag.to_string(),
    })
}

pub fn page(title: &str, blocks: Vec<Block>) -> Page {
    Page::new(
        PageId::parse(ALICE_PAGE).unwrap(),
        PageTitle::new(vec![RichTextItem::plain_text(title)]),
    )
    .with_blocks(blocks)
}

/// Accepts exactly `GOOD_TOKEN`, as alice.
#[derive(Default)]
pub struct StaticValidator {
    pub calls: AtomicUsize,
}

#[async_trait::async_trait]
impl CredentialValidator for StaticValidator {
    async fn validate(&self, token: &str) -> Result<CallerIdentity, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if token == GOOD_TOKEN {
            Ok(CallerIdentity {
                id: "user-1".to_string(),
                email: UserEmail::parse(ALICE).unwrap(),
            })
        } else {
            Err(AppError::unauthorized("token rejected by test validator"))
        }
    }
}

/// A fixed record list that counts lookups.
#[derive(Default)]
pub struct CountingLookup {
    pub records: Vec<LookupRecord>,
    pub calls: AtomicUsize,
}

impl CountingLookup {
    pub fn with_records(records: Vec<LookupRecord>) -> Self {
        Self {
            records,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl PageLookup for CountingLookup {
    async fn find_records(&self, user: &UserEmail) -> Result<Vec<LookupRecord>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .records
            .iter()
            .filter(|r| user.matches(&r.email))
            .cloned()
            .collect())
    }
}

/// Serves one page, or fails every call when `page` is `None`.
#[derive(Default)]
pub struct FakeNotion {
    pub page: Option<Page>,
    pub calls: AtomicUsize,
}

impl FakeNotion {
    pub fn serving(page: Page) -> Self {
        Self {
            page: Some(page),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl NotionRepository for FakeNotion {
    async fn retrieve_page(&self, id: &PageId) -> Result<Page, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.page {
            Some(page) if &page.id == id => Ok(Page::new(page.id.clone(), page.title.clone())),
            _ => Err(AppError::MalformedResponse(format!("no page {}", id))),
        }
    }

    async fn retrieve_children(&self, parent: &PageId) -> Result<Vec<Block>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.page {
            Some(page) if &page.id == parent => Ok(page.blocks.clone()),
            _ => Err(AppError::MalformedResponse(format!("no page {}", parent))),
        }
    }
}

pub fn alice_records() -> Vec<LookupRecord> {
    vec![LookupRecord::new("Alice@Example.com", ALICE_PAGE)]
}

pub fn shared<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
