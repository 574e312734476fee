#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Folder,
    Copy,
    RecycleBin,
    WebSearch,
    Error,
}

impl Icon {
    /// Image path relative to the plugin directory.
    pub fn path(self) -> &'static str {
        match self {
            Self::Folder => "Images/folder.png",
            Self::Copy => "Images/copy.png",
            Self::RecycleBin => "Images/recyclebin.png",
            Self::WebSearch => "Images/web_search.png",
            Self::Error => "Images/error.png",
        }
    }
}
