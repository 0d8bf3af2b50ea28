//! Media file detection
//!
//! Classifies browser items by extension so the controller can decide
//! whether an activated item is playable audio, video for the separate
//! video window, or something else entirely. Works on plain paths and on
//! URLs (query strings and fragments are stripped before the extension
//! is examined).

use crate::types::MediaKind;

/// Extension-based media classifier
pub struct MediaFileDetector;

impl MediaFileDetector {
    /// Audio extensions this player accepts
    pub const SUPPORTED_AUDIO: &'static [&'static str] = &[
        "mp3", "wav", "flac", "aac", "m4a", "ogg", "wma", "ape", "opus", "m4p", "mp4a",
    ];

    /// Video extensions (handled by the video window)
    pub const SUPPORTED_VIDEO: &'static [&'static str] = &[
        "mp4", "avi", "mkv", "wmv", "mov", "webm", "flv", "m4v", "3gp", "ogv", "ts", "mts",
    ];

    /// Playlist extensions (recognized but not directly playable here)
    pub const SUPPORTED_PLAYLISTS: &'static [&'static str] = &["m3u", "m3u8", "pls", "xspf"];

    /// Strip URL query/fragment and reduce URLs to their final path segment
    fn clean_name(name: &str) -> &str {
        let name = name.split(['?', '#']).next().unwrap_or(name);
        if name.starts_with("http://") || name.starts_with("https://") {
            name.rsplit('/').next().unwrap_or(name)
        } else {
            name
        }
    }

    /// Lowercased extension of a (cleaned) name, if any
    fn extension(name: &str) -> Option<String> {
        let clean = Self::clean_name(name);
        let base = clean.rsplit(['/', '\\']).next().unwrap_or(clean);
        let (stem, ext) = base.rsplit_once('.')?;
        if stem.is_empty() {
            return None; // dotfile, not an extension
        }
        Some(ext.to_ascii_lowercase())
    }

    /// Classify a file name, path, or URL
    pub fn classify(name: &str) -> MediaKind {
        match Self::extension(name) {
            Some(ext) if Self::SUPPORTED_AUDIO.contains(&ext.as_str()) => MediaKind::Audio,
            Some(ext) if Self::SUPPORTED_VIDEO.contains(&ext.as_str()) => MediaKind::Video,
            _ => MediaKind::Other,
        }
    }

    /// Whether the item is playable media (audio or video)
    pub fn is_playable(name: &str) -> bool {
        matches!(Self::classify(name), MediaKind::Audio | MediaKind::Video)
    }

    /// Whether the item is a playlist file
    pub fn is_playlist(name: &str) -> bool {
        Self::extension(name)
            .map(|ext| Self::SUPPORTED_PLAYLISTS.contains(&ext.as_str()))
            .unwrap_or(false)
    }

    /// Partition a listing into audio, video, and everything else
    pub fn filter_media<'a>(names: &[&'a str]) -> (Vec<&'a str>, Vec<&'a str>, Vec<&'a str>) {
        let mut audio = Vec::new();
        let mut video = Vec::new();
        let mut other = Vec::new();

        for name in names {
            match Self::classify(name) {
                MediaKind::Audio => audio.push(*name),
                MediaKind::Video => video.push(*name),
                MediaKind::Other => other.push(*name),
            }
        }

        (audio, video, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_common_extensions() {
        assert_eq!(MediaFileDetector::classify("song.mp3"), MediaKind::Audio);
        assert_eq!(MediaFileDetector::classify("song.FLAC"), MediaKind::Audio);
        assert_eq!(MediaFileDetector::classify("movie.mkv"), MediaKind::Video);
        assert_eq!(MediaFileDetector::classify("notes.txt"), MediaKind::Other);
        assert_eq!(MediaFileDetector::classify("noext"), MediaKind::Other);
    }

    #[test]
    fn playlists_are_recognized_but_not_playable() {
        assert!(MediaFileDetector::is_playlist("mix.m3u8"));
        assert_eq!(MediaFileDetector::classify("mix.m3u8"), MediaKind::Other);
        assert!(!MediaFileDetector::is_playable("mix.m3u8"));
    }

    #[test]
    fn url_query_and_fragment_are_stripped() {
        assert_eq!(
            MediaFileDetector::classify("https://host/media/track.mp3?token=abc&x=1"),
            MediaKind::Audio
        );
        assert_eq!(
            MediaFileDetector::classify("https://host/media/clip.mp4#t=30"),
            MediaKind::Video
        );
        // No extension once the query is gone
        assert_eq!(
            MediaFileDetector::classify("https://host/stream?fmt=mp3"),
            MediaKind::Other
        );
    }

    #[test]
    fn dotfiles_have_no_extension() {
        assert_eq!(MediaFileDetector::classify(".gitignore"), MediaKind::Other);
        assert_eq!(MediaFileDetector::classify("/home/user/.mp3"), MediaKind::Other);
    }

    #[test]
    fn filter_media_partitions_listing() {
        let names = ["a.mp3", "b.mkv", "c.txt", "d.ogg"];
        let (audio, video, other) = MediaFileDetector::filter_media(&names);
        assert_eq!(audio, vec!["a.mp3", "d.ogg"]);
        assert_eq!(video, vec!["b.mkv"]);
        assert_eq!(other, vec!["c.txt"]);
    }
}
