//! The content block variant set and its validator.
//!
//! Every piece of lesson content is a [`ContentBlock`]: a flat, closed
//! tagged union with one case per [`BlockKind`]. Raw records coming from
//! content files are turned into typed blocks by [`parse_block`], which
//! reports the exact field that is missing or ill-typed. Blocks built in
//! code go through the same semantic rules via [`check_block`].

pub mod block;
pub mod kind;
pub mod validate;

pub use block::{
    Assignment, CalloutBlock, CalloutVariant, CodeBlock, Column, ComponentGrid, ContentBlock,
    FeatureCard, FeatureCards, FileNode, FileStructure, GridItem, ImageBlock, ListBlock, ListItem,
    Question, Quiz, ResourceCard, ResourceCards, TextBlock, TwoColumn,
};
pub use kind::BlockKind;
pub use validate::{check_block, parse_block};
