use std::path::Path;

use furigana_core::Aligner;
use furigana_engine::lyrics::{write_lyric_note, LyricNote};

use super::annotate_ops::load_lexicon;
use super::read_lines;

pub struct NoteMeta<'a> {
    pub title: &'a str,
    pub artist: &'a str,
    pub album: &'a str,
    pub track: u32,
    pub total: u32,
    /// File with one album track title per line.
    pub titles: Option<&'a str>,
}

pub fn note_cmd(input: &str, lexicon_file: &str, meta: &NoteMeta<'_>, out_root: &str) {
    let lines = die!(read_lines(Path::new(input)), "Error reading {input}: {}");
    let track_titles = match meta.titles {
        Some(file) => die!(read_lines(Path::new(file)), "Error reading {file}: {}")
            .into_iter()
            .filter(|t| !t.trim().is_empty())
            .collect(),
        None => Vec::new(),
    };
    let lexicon = load_lexicon(lexicon_file);
    let aligner = Aligner::new(&lexicon);

    let note = LyricNote {
        title: meta.title.to_string(),
        artist: meta.artist.to_string(),
        album: meta.album.to_string(),
        track_number: meta.track,
        total_tracks: meta.total,
        track_titles,
    };
    let path = die!(
        write_lyric_note(Path::new(out_root), &aligner, &note, &lines),
        "Error writing note: {}"
    );
    println!("{}", path.display());
}
