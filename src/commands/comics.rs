//! Comics gallery: PDFs from the configured folder.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use colored::Colorize;

use super::AppContext;
use crate::io::atomic::atomic_write;

pub const TAGLINE: &str = "A quantum adventure awaits!";

#[derive(Clone, Debug, PartialEq)]
pub struct Comic {
    pub title: String,
    pub path: PathBuf,
    pub pages: usize,
    pub bytes: u64,
}

#[derive(Debug, PartialEq)]
pub enum Gallery {
    MissingFolder(PathBuf),
    Empty(PathBuf),
    Comics(Vec<Comic>),
}

/// `quantum_cats.pdf` → `quantum cats`
pub fn title_from_file(path: &Path) -> String {
    path.file_stem().map(|s| s.to_string_lossy().replace('_', " ")).unwrap_or_default()
}

/// Page count from the document's page tree, following xref and object
/// streams. Files lopdf cannot load fall back to a raw object scan.
pub fn count_pdf_pages(bytes: &[u8]) -> usize {
    match lopdf::Document::load_mem(bytes) {
        Ok(doc) => match doc.get_pages().len() {
            0 => scan_page_objects(bytes),
            n => n,
        },
        Err(e) => {
            crate::debug_log!("comics: lopdf could not load ({e}); scanning objects");
            scan_page_objects(bytes)
        }
    }
}

/// Count `/Type /Page` objects (not `/Pages`) in the uncompressed bytes.
fn scan_page_objects(bytes: &[u8]) -> usize {
    const KEY: &[u8] = b"/Type";
    let mut count = 0;
    let mut i = 0;
    while i + KEY.len() <= bytes.len() {
        if &bytes[i..i + KEY.len()] != KEY {
            i += 1;
            continue;
        }
        let mut j = i + KEY.len();
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        if bytes[j..].starts_with(b"/Page") {
            let after = bytes.get(j + 5).copied();
            if !matches!(after, Some(c) if c.is_ascii_alphanumeric()) {
                count += 1;
            }
        }
        i = j.max(i + 1);
    }
    count
}

pub fn scan(dir: &Path) -> Result<Gallery> {
    if !dir.is_dir() {
        return Ok(Gallery::MissingFolder(dir.to_path_buf()));
    }
    let mut comics = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read comics folder {}", dir.display()))? {
        let path = entry?.path();
        let is_pdf = path.extension().map(|e| e.eq_ignore_ascii_case("pdf")).unwrap_or(false);
        if !is_pdf || !path.is_file() {
            continue;
        }
        let bytes = fs::read(&path).with_context(|| format!("read comic {}", path.display()))?;
        comics.push(Comic {
            title: title_from_file(&path),
            pages: count_pdf_pages(&bytes),
            bytes: bytes.len() as u64,
            path,
        });
    }
    comics.sort_by(|a, b| a.title.cmp(&b.title));
    crate::debug_log!("comics: {} pdf(s) in {}", comics.len(), dir.display());
    Ok(if comics.is_empty() { Gallery::Empty(dir.to_path_buf()) } else { Gallery::Comics(comics) })
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

/// Self-contained gallery page: every PDF embedded as a data URI.
pub fn gallery_html(comics: &[Comic]) -> Result<String> {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>Quantum Comics</title>\n\
         <style>body{background:#161616;color:#f4f4f4;font-family:'IBM Plex Sans',sans-serif}\
         .comic-grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(280px,1fr));gap:1.5rem}\
         .comic-tile{background:#262626;border:1px solid #393939;padding:1.2rem}\
         .comic-tile:hover{border-color:#0f62fe}</style></head><body>\n<h1>Quantum Comics</h1>\n<div class=\"comic-grid\">\n",
    );
    for c in comics {
        let bytes = fs::read(&c.path).with_context(|| format!("read comic {}", c.path.display()))?;
        let title = html_escape(&c.title);
        html.push_str(&format!(
            "<div class=\"comic-tile\"><div class=\"comic-title\">{title}</div>\
             <div class=\"comic-description\">{TAGLINE} ({} pages)</div>\
             <iframe src=\"data:application/pdf;base64,{}\" width=\"100%\" height=\"400\" title=\"{title}\"></iframe></div>\n",
            c.pages,
            STANDARD.encode(&bytes)
        ));
    }
    html.push_str("</div>\n</body></html>\n");
    Ok(html)
}

fn human_size(bytes: u64) -> String {
    match bytes {
        b if b >= 1 << 20 => format!("{:.1} MiB", b as f64 / (1u64 << 20) as f64),
        b if b >= 1 << 10 => format!("{:.1} KiB", b as f64 / 1024.0),
        b => format!("{b} B"),
    }
}

pub struct ComicsOpts {
    pub dir: Option<PathBuf>,
    pub view: Option<String>,
    pub export: Option<PathBuf>,
}

pub fn run(ctx: &mut AppContext, opts: ComicsOpts) -> Result<()> {
    let dir = opts.dir.unwrap_or_else(|| ctx.config.comics_dir.clone());
    println!("{}", "Quantum Comics".bold());
    println!("Explore our collection of quantum-themed comics.\n");

    let comics = match scan(&dir)? {
        Gallery::MissingFolder(d) => {
            eprintln!(
                "{} Comics folder not found ({}). Create it and add PDF comics.",
                "warn:".yellow().bold(),
                d.display()
            );
            return Ok(());
        }
        Gallery::Empty(d) => {
            println!("No comics found in {}. Add PDF files to display them here.", d.display());
            return Ok(());
        }
        Gallery::Comics(c) => c,
    };

    for c in &comics {
        println!("  {}  {TAGLINE}  [{} pages, {}]", c.title.bold(), c.pages, human_size(c.bytes));
    }

    if let Some(want) = opts.view {
        let hit = comics.iter().find(|c| c.title.eq_ignore_ascii_case(want.trim()));
        match hit {
            Some(c) => {
                println!("\nViewing: {}", c.path.file_name().map(|f| f.to_string_lossy()).unwrap_or_default());
                println!("  path:  {}", c.path.display());
                println!("  pages: {}", c.pages);
                ctx.session.state.selected_comic = Some(c.title.clone());
                ctx.session.save()?;
            }
            None => eprintln!("{} no comic titled '{want}'", "warn:".yellow().bold()),
        }
    }

    if let Some(out) = opts.export {
        let html = gallery_html(&comics)?;
        atomic_write(&out, html).with_context(|| format!("write gallery {}", out.display()))?;
        println!("{} gallery written to {}", "ok:".green().bold(), out.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_PAGES: &[u8] = b"%PDF-1.4\n1 0 obj << /Type /Catalog /Pages 2 0 R >> endobj\n\
        2 0 obj << /Type /Pages /Kids [3 0 R 4 0 R] /Count 2 >> endobj\n\
        3 0 obj << /Type /Page /Parent 2 0 R >> endobj\n4 0 obj <</Type/Page/Parent 2 0 R>> endobj\n%%EOF";

    // Catalog, page tree and three pages packed in a FlateDecode /ObjStm,
    // indexed by a cross-reference stream.
    const COMPRESSED_THREE_PAGES: &[u8] = include_bytes!("../../tests/fixtures/objstm.pdf");

    #[test]
    fn page_count_skips_pages_tree() {
        assert_eq!(count_pdf_pages(TWO_PAGES), 2);
        assert_eq!(count_pdf_pages(b"/Type"), 0);
    }

    #[test]
    fn page_count_reads_object_streams() {
        assert_eq!(scan_page_objects(COMPRESSED_THREE_PAGES), 0);
        assert_eq!(count_pdf_pages(COMPRESSED_THREE_PAGES), 3);
    }

    #[test]
    fn scan_states() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(scan(&dir.path().join("missing")).unwrap(), Gallery::MissingFolder(_)));
        assert!(matches!(scan(dir.path()).unwrap(), Gallery::Empty(_)));

        fs::write(dir.path().join("spooky_link.pdf"), TWO_PAGES).unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        match scan(dir.path()).unwrap() {
            Gallery::Comics(c) => {
                assert_eq!(c.len(), 1);
                assert_eq!(c[0].title, "spooky link");
                assert_eq!(c[0].pages, 2);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn export_embeds_data_uri() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("a_b.pdf");
        fs::write(&p, TWO_PAGES).unwrap();
        let comic = Comic { title: "a <b>".into(), path: p, pages: 2, bytes: 0 };
        let html = gallery_html(&[comic]).unwrap();
        assert!(html.contains("data:application/pdf;base64,JVBERi0xLjQ"));
        assert!(html.contains("a &lt;b&gt;"));
    }
}
