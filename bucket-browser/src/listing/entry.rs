//! Classification of object keys into display entries

use strum::Display;

use super::path;

/// Material icon shown next to an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Icon {
    /// Compressed archives
    Archive,
    /// Images
    Photo,
    /// Audio
    MusicNote,
    /// Anything else, directories included
    InsertDriveFile,
}

impl Icon {
    /// Picks the icon for a key by its exact, case-sensitive extension
    #[must_use]
    pub fn for_key(key: &str) -> Self {
        match path::ext(key) {
            ".tgz" | ".gz" | ".zip" => Self::Archive,
            ".png" | ".jpg" | ".gif" | ".svg" => Self::Photo,
            ".mp3" | ".wav" => Self::MusicNote,
            _ => Self::InsertDriveFile,
        }
    }
}

/// How a single object key is presented
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryKind {
    /// Icon picked by extension
    pub icon: Icon,
    /// Last path element, ending in `/` for directories
    pub name: String,
    /// Whether the key ends with `/`
    pub is_directory: bool,
}

/// Classifies an object key
#[must_use]
pub fn classify(key: &str) -> EntryKind {
    let is_directory = key.ends_with('/');
    let mut name = path::base(key);
    if is_directory && !name.ends_with('/') {
        name.push('/');
    }

    EntryKind {
        icon: Icon::for_key(key),
        name,
        is_directory,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_table() {
        assert_eq!(classify("backup.tgz").icon, Icon::Archive);
        assert_eq!(classify("archive.tar.gz").icon, Icon::Archive);
        assert_eq!(classify("bundle.zip").icon, Icon::Archive);
        assert_eq!(classify("a/b/pic.png").icon, Icon::Photo);
        assert_eq!(classify("pic.jpg").icon, Icon::Photo);
        assert_eq!(classify("anim.gif").icon, Icon::Photo);
        assert_eq!(classify("logo.svg").icon, Icon::Photo);
        assert_eq!(classify("song.mp3").icon, Icon::MusicNote);
        assert_eq!(classify("take.wav").icon, Icon::MusicNote);
        assert_eq!(classify("notes.txt").icon, Icon::InsertDriveFile);
        assert_eq!(classify("Makefile").icon, Icon::InsertDriveFile);
    }

    #[test]
    fn test_extension_match_is_case_sensitive() {
        assert_eq!(classify("pic.PNG").icon, Icon::InsertDriveFile);
        assert_eq!(classify("pic.Jpg").icon, Icon::InsertDriveFile);
    }

    #[test]
    fn test_icon_tags() {
        assert_eq!(Icon::Archive.to_string(), "archive");
        assert_eq!(Icon::Photo.to_string(), "photo");
        assert_eq!(Icon::MusicNote.to_string(), "music_note");
        assert_eq!(Icon::InsertDriveFile.to_string(), "insert_drive_file");
    }

    #[test]
    fn test_directory_keys() {
        let kind = classify("photos/2020/");
        assert!(kind.is_directory);
        assert_eq!(kind.name, "2020/");
        assert_eq!(kind.icon, Icon::InsertDriveFile);

        let kind = classify("top/");
        assert!(kind.is_directory);
        assert_eq!(kind.name, "top/");
    }

    #[test]
    fn test_directory_looking_extension_is_not_an_icon_match() {
        let kind = classify("backups.zip/");
        assert!(kind.is_directory);
        assert_eq!(kind.icon, Icon::InsertDriveFile);
        assert_eq!(kind.name, "backups.zip/");
    }

    #[test]
    fn test_file_keys() {
        let kind = classify("photos/2020/a.jpg");
        assert!(!kind.is_directory);
        assert_eq!(kind.name, "a.jpg");

        let kind = classify("plain");
        assert!(!kind.is_directory);
        assert_eq!(kind.name, "plain");
    }

    #[test]
    fn test_degenerate_keys() {
        let kind = classify("/");
        assert!(kind.is_directory);
        assert_eq!(kind.name, "/");

        let kind = classify("");
        assert!(!kind.is_directory);
        assert_eq!(kind.name, ".");
    }
}
