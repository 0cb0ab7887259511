//! # Remote Resource Descriptions

/// A resource with constant mirror URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstUrlResource {
    /// The mirror URLs of this resource; the first one names the file.
    pub urls: &'static [&'static str],
}

impl ConstUrlResource {
    /// The file name; the final segment of the first URL.
    pub fn file_name(&self) -> Option<&'static str> {
        let url: &'static str = *self.urls.first()?;
        url.rsplit('/').next().filter(|name| !name.is_empty())
    }
}

/// A keyed resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyedResource {
    /// The key associated with this resource.
    ///
    /// This is used in place of a URI for internal caching
    /// and fetch unification.
    pub key: &'static [&'static str],

    /// The resource associated with this key.
    pub resource: ConstUrlResource,
}

impl KeyedResource {
    /// The file name of the resource.
    pub fn file_name(&self) -> Option<&'static str> {
        self.resource.file_name()
    }
}
