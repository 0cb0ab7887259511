//! # Resources
//!
//! The GPT-2 vocabulary ships as two files, `encoder.json` and `vocab.bpe`.
//! A [`ResourceLoader`] turns a [`KeyedResource`] into a local path;
//! see [`DirectoryResources`], and (feature ``download``) the disk cache.

mod directory_resources;
mod resource_loader;
mod url_resource;

#[doc(inline)]
pub use directory_resources::{BYTEPAIR_RESOURCE_DIR, DirectoryResources};
#[doc(inline)]
pub use resource_loader::ResourceLoader;
#[doc(inline)]
pub use url_resource::{ConstUrlResource, KeyedResource};

/// The OpenAI GPT-2 `encoder.json` resource.
pub const GPT2_ENCODER_JSON_KEYED_RESOURCE: KeyedResource = KeyedResource {
    key: &["openai", "gpt2"],
    resource: ConstUrlResource {
        urls: &["https://openaipublic.blob.core.windows.net/gpt-2/encodings/main/encoder.json"],
    },
};

/// The OpenAI GPT-2 `vocab.bpe` resource.
pub const GPT2_VOCAB_BPE_KEYED_RESOURCE: KeyedResource = KeyedResource {
    key: &["openai", "gpt2"],
    resource: ConstUrlResource {
        urls: &["https://openaipublic.blob.core.windows.net/gpt-2/encodings/main/vocab.bpe"],
    },
};
