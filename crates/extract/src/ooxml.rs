//! OOXML (.docx / .pptx) text extraction.
//!
//! Both formats are ZIP archives of XML parts. Text lives in `w:t`
//! runs (Word) and `a:t` runs (PowerPoint); paragraph boundaries become
//! newlines. Reading order inside a part is document order.

use crate::SourceFormat;
use deckgen_core::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Decide whether a ZIP payload is a Word document or a presentation.
pub(crate) fn classify_container(bytes: &[u8]) -> Option<SourceFormat> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).ok()?;

    if archive.by_name("word/document.xml").is_ok() {
        return Some(SourceFormat::Docx);
    }
    if archive.by_name("ppt/presentation.xml").is_ok() {
        return Some(SourceFormat::Pptx);
    }

    None
}

/// Extract text from a .docx payload.
pub fn docx_text(bytes: &[u8]) -> Result<String> {
    let mut archive = open_archive(bytes)?;
    let document = read_part(&mut archive, "word/document.xml")?;
    Ok(part_text(&document))
}

/// Extract text from a .pptx payload.
///
/// Slides are processed in numeric order, one paragraph per line, a
/// blank line between slides.
pub fn pptx_text(bytes: &[u8]) -> Result<String> {
    let mut archive = open_archive(bytes)?;

    let mut slide_paths: Vec<(usize, String)> = archive
        .file_names()
        .filter(|name| {
            name.starts_with("ppt/slides/slide") && name.ends_with(".xml")
        })
        .map(|name| (slide_number(name).unwrap_or(usize::MAX), name.to_string()))
        .collect();
    slide_paths.sort();

    let mut sections = Vec::new();
    for (_, path) in &slide_paths {
        let content = read_part(&mut archive, path)?;
        let text = part_text(&content);
        if !text.trim().is_empty() {
            sections.push(text);
        }
    }

    Ok(sections.join("\n\n"))
}

fn open_archive(bytes: &[u8]) -> Result<ZipArchive<Cursor<&[u8]>>> {
    ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| Error::ZipError(format!("Failed to open archive: {}", e)))
}

fn read_part(archive: &mut ZipArchive<Cursor<&[u8]>>, path: &str) -> Result<String> {
    let mut part = archive
        .by_name(path)
        .map_err(|e| Error::ZipError(format!("Part not found '{}': {}", path, e)))?;

    let mut content = String::new();
    part.read_to_string(&mut content)
        .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

    Ok(content)
}

/// Collect the text runs of one XML part, one paragraph per line.
///
/// Works for both Word (`w:p`/`w:t`) and DrawingML (`a:p`/`a:t`) since
/// only local names are matched. A parse error ends the scan of the
/// part; text collected up to that point is kept.
fn part_text(xml: &str) -> String {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if local_name(e.name().as_ref()) == b"t" => {
                in_text_run = true;
            }
            Ok(Event::Text(ref e)) if in_text_run => {
                out.push_str(&e.unescape().unwrap_or_default());
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"t" => in_text_run = false,
                b"p" => {
                    if !out.ends_with('\n') && !out.is_empty() {
                        out.push('\n');
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                // The reader may not advance past a malformed region;
                // stop here instead of risking a spin.
                log::warn!("XML parsing error, stopping scan of this part: {}", e);
                break;
            }
            _ => {}
        }
    }

    out.trim_end().to_string()
}

/// Extract the local name from a potentially namespaced element name.
fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().position(|&b| b == b':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

/// Extract the slide number from a part name like "ppt/slides/slide3.xml".
fn slide_number(path: &str) -> Option<usize> {
    let stem = path.trim_end_matches(".xml");
    let digits: String = stem
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.chars().rev().collect::<String>().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn build_zip(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in parts {
            zip.start_file(*name, FileOptions::default()).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    fn docx_fixture() -> Vec<u8> {
        build_zip(&[(
            "word/document.xml",
            r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body>
<w:p><w:r><w:t>First paragraph.</w:t></w:r></w:p>
<w:p><w:r><w:t>Second </w:t></w:r><w:r><w:t>paragraph.</w:t></w:r></w:p>
</w:body></w:document>"#,
        )])
    }

    fn pptx_fixture() -> Vec<u8> {
        let slide = |text: &str| {
            format!(
                r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:sp><p:txBody><a:p><a:r><a:t>{}</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#,
                text
            )
        };
        let slide1 = slide("Slide one text");
        let slide2 = slide("Slide two text");
        build_zip(&[
            ("ppt/presentation.xml", "<p:presentation/>"),
            // Out of archive order on purpose; extraction must sort.
            ("ppt/slides/slide2.xml", &slide2),
            ("ppt/slides/slide1.xml", &slide1),
        ])
    }

    #[test]
    fn test_docx_paragraphs_become_lines() {
        let text = docx_text(&docx_fixture()).unwrap();
        assert_eq!(text, "First paragraph.\nSecond paragraph.");
    }

    #[test]
    fn test_pptx_slides_in_numeric_order() {
        let text = pptx_text(&pptx_fixture()).unwrap();
        assert_eq!(text, "Slide one text\n\nSlide two text");
    }

    #[test]
    fn test_container_classification() {
        assert_eq!(
            classify_container(&docx_fixture()),
            Some(SourceFormat::Docx)
        );
        assert_eq!(
            classify_container(&pptx_fixture()),
            Some(SourceFormat::Pptx)
        );
        assert_eq!(
            classify_container(&build_zip(&[("other.txt", "x")])),
            None
        );
    }

    #[test]
    fn test_detect_prefers_magic_over_extension() {
        // A docx payload with a misleading extension still classifies
        // as a Word document.
        let format = SourceFormat::detect(&docx_fixture(), "renamed.txt");
        assert_eq!(format, Some(SourceFormat::Docx));
    }

    #[test]
    fn test_extract_text_end_to_end() {
        let text = crate::extract_text(&pptx_fixture(), "deck.pptx").unwrap();
        assert!(text.contains("Slide one text"));
        assert!(text.contains("Slide two text"));
    }

    #[test]
    fn test_slide_number_parsing() {
        assert_eq!(slide_number("ppt/slides/slide1.xml"), Some(1));
        assert_eq!(slide_number("ppt/slides/slide42.xml"), Some(42));
        assert_eq!(slide_number("ppt/slides/slide.xml"), None);
    }

    #[test]
    fn test_malformed_xml_keeps_text_seen_so_far() {
        // Mismatched end tag stops the scan; earlier runs survive.
        let text = part_text("<w:p><w:t>kept</w:t></w:p><w:p></w:mismatch>");
        assert_eq!(text, "kept");
    }

    #[test]
    fn test_escaped_entities_are_unescaped() {
        let payload = build_zip(&[(
            "word/document.xml",
            r#"<w:document xmlns:w="x"><w:p><w:t>a &amp; b &lt; c</w:t></w:p></w:document>"#,
        )]);
        assert_eq!(docx_text(&payload).unwrap(), "a & b < c");
    }
}
