//! PPTX deck writer implementation.
//!
//! Builds a minimal Office Open XML package: one slide master, two
//! layouts (title and title-plus-content), a theme carrying the style
//! palette, the generated slides, and notes slides for visual
//! suggestions. Slide 1 is always a dedicated title slide and is not
//! taken from the slide sequence.

use deckgen_core::{DeckStyle, Error, Palette, Result, Slide};
use quick_xml::escape::escape;
use std::io::{Cursor, Seek, Write};
use zip::write::FileOptions;
use zip::ZipWriter;

/// EMU dimensions of a 4:3 slide.
const SLIDE_CX: u32 = 9_144_000;
const SLIDE_CY: u32 = 6_858_000;

/// Subtitle placed on the generated title slide.
const TITLE_SLIDE_SUBTITLE: &str = "Generated with AI";

/// Writer for PPTX deck output.
pub struct DeckWriter {
    palette: Palette,
}

impl DeckWriter {
    /// Create a writer using the given style's palette.
    pub fn new(style: DeckStyle) -> Self {
        Self {
            palette: style.palette(),
        }
    }

    /// Render the deck into an in-memory buffer.
    pub fn to_bytes(&self, title: &str, slides: &[Slide]) -> Result<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        self.write(&mut buf, title, slides)?;
        Ok(buf.into_inner())
    }

    /// Render the deck into `sink` as a complete .pptx package.
    pub fn write<W: Write + Seek>(&self, sink: W, title: &str, slides: &[Slide]) -> Result<()> {
        // 1-based indices of slides carrying a notes part. Slide 1 is
        // the title slide, so content slide i maps to slide i + 1.
        let noted: Vec<usize> = slides
            .iter()
            .enumerate()
            .filter(|(_, s)| s.visual_suggestion.is_some())
            .map(|(i, _)| i + 2)
            .collect();
        let slide_count = slides.len() + 1;

        log::debug!(
            "writing deck: {} slides ({} with notes)",
            slide_count,
            noted.len()
        );

        let mut zip = ZipWriter::new(sink);
        let options = FileOptions::default();

        let mut put = |path: &str, content: String| -> Result<()> {
            zip.start_file(path, options)
                .map_err(|e| Error::ZipError(format!("Failed to add '{}': {}", path, e)))?;
            zip.write_all(content.as_bytes())
                .map_err(|e| Error::ZipError(format!("Failed to write '{}': {}", path, e)))?;
            Ok(())
        };

        put(
            "[Content_Types].xml",
            content_types_xml(slide_count, &noted),
        )?;
        put("_rels/.rels", root_rels_xml())?;
        put("docProps/core.xml", core_props_xml(title))?;
        put("docProps/app.xml", app_props_xml())?;
        put(
            "ppt/presentation.xml",
            presentation_xml(slide_count, !noted.is_empty()),
        )?;
        put(
            "ppt/_rels/presentation.xml.rels",
            presentation_rels_xml(slide_count, !noted.is_empty()),
        )?;
        put("ppt/theme/theme1.xml", theme_xml(&self.palette))?;
        put(
            "ppt/slideMasters/slideMaster1.xml",
            slide_master_xml(&self.palette),
        )?;
        put(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            slide_master_rels_xml(),
        )?;
        put(
            "ppt/slideLayouts/slideLayout1.xml",
            slide_layout_xml("title", "Title Slide"),
        )?;
        put(
            "ppt/slideLayouts/slideLayout2.xml",
            slide_layout_xml("obj", "Title and Content"),
        )?;
        put(
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            slide_layout_rels_xml(),
        )?;
        put(
            "ppt/slideLayouts/_rels/slideLayout2.xml.rels",
            slide_layout_rels_xml(),
        )?;

        // Slide 1: the dedicated title slide.
        put("ppt/slides/slide1.xml", self.title_slide_xml(title))?;
        put(
            "ppt/slides/_rels/slide1.xml.rels",
            slide_rels_xml(1, None),
        )?;

        // Content slides.
        let mut notes_number = 0usize;
        for (i, slide) in slides.iter().enumerate() {
            let number = i + 2;
            let notes = if slide.visual_suggestion.is_some() {
                notes_number += 1;
                Some(notes_number)
            } else {
                None
            };

            put(
                &format!("ppt/slides/slide{}.xml", number),
                self.content_slide_xml(slide),
            )?;
            put(
                &format!("ppt/slides/_rels/slide{}.xml.rels", number),
                slide_rels_xml(2, notes),
            )?;

            if let (Some(n), Some(note)) = (notes, slide.visual_suggestion.as_deref()) {
                put(
                    &format!("ppt/notesSlides/notesSlide{}.xml", n),
                    notes_slide_xml(&format!("Visual suggestion: {}", note)),
                )?;
                put(
                    &format!("ppt/notesSlides/_rels/notesSlide{}.xml.rels", n),
                    notes_slide_rels_xml(number),
                )?;
            }
        }

        if !noted.is_empty() {
            put("ppt/notesMasters/notesMaster1.xml", notes_master_xml())?;
            put(
                "ppt/notesMasters/_rels/notesMaster1.xml.rels",
                notes_master_rels_xml(),
            )?;
        }

        zip.finish()
            .map_err(|e| Error::ZipError(format!("Failed to finalize package: {}", e)))?;

        Ok(())
    }

    /// XML for the dedicated title slide: centered 44 pt bold title and
    /// a fixed subtitle.
    fn title_slide_xml(&self, title: &str) -> String {
        let title_color = self.palette.title.to_hex();
        let body_color = self.palette.body.to_hex();
        let title = escape(title);

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/><p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="ctrTitle"/></p:nvPr></p:nvSpPr><p:spPr><a:xfrm><a:off x="685800" y="2130425"/><a:ext cx="7772400" cy="1470025"/></a:xfrm></p:spPr><p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:pPr algn="ctr"/><a:r><a:rPr lang="en-US" sz="4400" b="1"><a:solidFill><a:srgbClr val="{title_color}"/></a:solidFill></a:rPr><a:t>{title}</a:t></a:r></a:p></p:txBody></p:sp><p:sp><p:nvSpPr><p:cNvPr id="3" name="Subtitle 2"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="subTitle" idx="1"/></p:nvPr></p:nvSpPr><p:spPr><a:xfrm><a:off x="1371600" y="3886200"/><a:ext cx="6400800" cy="1752600"/></a:xfrm></p:spPr><p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:pPr algn="ctr"/><a:r><a:rPr lang="en-US" sz="2000"><a:solidFill><a:srgbClr val="{body_color}"/></a:solidFill></a:rPr><a:t>{subtitle}</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#,
            title_color = title_color,
            body_color = body_color,
            title = title,
            subtitle = escape(TITLE_SLIDE_SUBTITLE),
        )
    }

    /// XML for one content slide: 36 pt heading plus level-0 bullet
    /// paragraphs at 24 pt.
    fn content_slide_xml(&self, slide: &Slide) -> String {
        let title_color = self.palette.title.to_hex();
        let body_color = self.palette.body.to_hex();

        let bullets: String = if slide.points.is_empty() {
            // A body placeholder must carry at least one paragraph.
            "<a:p><a:endParaRPr lang=\"en-US\"/></a:p>".to_string()
        } else {
            slide
                .points
                .iter()
                .map(|point| {
                    format!(
                        r#"<a:p><a:pPr lvl="0"/><a:r><a:rPr lang="en-US" sz="2400"><a:solidFill><a:srgbClr val="{body_color}"/></a:solidFill></a:rPr><a:t>{text}</a:t></a:r></a:p>"#,
                        body_color = body_color,
                        text = escape(point),
                    )
                })
                .collect()
        };

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/><p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr><a:xfrm><a:off x="457200" y="274638"/><a:ext cx="8229600" cy="1143000"/></a:xfrm></p:spPr><p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r><a:rPr lang="en-US" sz="3600"><a:solidFill><a:srgbClr val="{title_color}"/></a:solidFill></a:rPr><a:t>{heading}</a:t></a:r></a:p></p:txBody></p:sp><p:sp><p:nvSpPr><p:cNvPr id="3" name="Content 2"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="body" idx="1"/></p:nvPr></p:nvSpPr><p:spPr><a:xfrm><a:off x="457200" y="1600200"/><a:ext cx="8229600" cy="4525963"/></a:xfrm></p:spPr><p:txBody><a:bodyPr/><a:lstStyle/>{bullets}</p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#,
            title_color = title_color,
            heading = escape(&slide.heading),
            bullets = bullets,
        )
    }
}

fn content_types_xml(slide_count: usize, noted: &[usize]) -> String {
    let mut overrides = String::new();

    for n in 1..=slide_count {
        overrides.push_str(&format!(
            r#"<Override PartName="/ppt/slides/slide{n}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#
        ));
    }
    if !noted.is_empty() {
        overrides.push_str(r#"<Override PartName="/ppt/notesMasters/notesMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.notesMaster+xml"/>"#);
        for n in 1..=noted.len() {
            overrides.push_str(&format!(
                r#"<Override PartName="/ppt/notesSlides/notesSlide{n}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.notesSlide+xml"/>"#
            ));
        }
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/><Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/><Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/><Override PartName="/ppt/slideLayouts/slideLayout2.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/><Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/><Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>{overrides}</Types>"#
    )
}

fn root_rels_xml() -> String {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/></Relationships>"#
        .to_string()
}

fn core_props_xml(title: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:title>{}</dc:title><dc:creator>deckgen</dc:creator></cp:coreProperties>"#,
        escape(title)
    )
}

fn app_props_xml() -> String {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"><Application>deckgen</Application></Properties>"#
        .to_string()
}

fn presentation_xml(slide_count: usize, has_notes: bool) -> String {
    let slide_ids: String = (0..slide_count)
        .map(|i| {
            format!(
                r#"<p:sldId id="{}" r:id="rId{}"/>"#,
                256 + i,
                i + 2
            )
        })
        .collect();

    let notes_master = if has_notes {
        format!(
            r#"<p:notesMasterIdLst><p:notesMasterId r:id="rId{}"/></p:notesMasterIdLst>"#,
            slide_count + 2
        )
    } else {
        String::new()
    };

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>{notes_master}<p:sldIdLst>{slide_ids}</p:sldIdLst><p:sldSz cx="{cx}" cy="{cy}"/><p:notesSz cx="{cy}" cy="{cx}"/></p:presentation>"#,
        notes_master = notes_master,
        slide_ids = slide_ids,
        cx = SLIDE_CX,
        cy = SLIDE_CY,
    )
}

fn presentation_rels_xml(slide_count: usize, has_notes: bool) -> String {
    let mut rels = String::from(
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>"#,
    );

    for i in 0..slide_count {
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
            i + 2,
            i + 1
        ));
    }
    if has_notes {
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/notesMaster" Target="notesMasters/notesMaster1.xml"/>"#,
            slide_count + 2
        ));
    }
    rels.push_str(&format!(
        r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>"#,
        slide_count + if has_notes { 3 } else { 2 }
    ));

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{rels}</Relationships>"#
    )
}

fn theme_xml(palette: &Palette) -> String {
    let accent = palette.accent.to_hex();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Deck Theme"><a:themeElements><a:clrScheme name="Deck"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="{title}"/></a:dk2><a:lt2><a:srgbClr val="{bg}"/></a:lt2><a:accent1><a:srgbClr val="{accent}"/></a:accent1><a:accent2><a:srgbClr val="{accent}"/></a:accent2><a:accent3><a:srgbClr val="{accent}"/></a:accent3><a:accent4><a:srgbClr val="{accent}"/></a:accent4><a:accent5><a:srgbClr val="{accent}"/></a:accent5><a:accent6><a:srgbClr val="{accent}"/></a:accent6><a:hlink><a:srgbClr val="0563C1"/></a:hlink><a:folHlink><a:srgbClr val="954F72"/></a:folHlink></a:clrScheme><a:fontScheme name="Deck"><a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme><a:fmtScheme name="Office"><a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst><a:lnStyleLst><a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln></a:lnStyleLst><a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst><a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:bgFillStyleLst></a:fmtScheme></a:themeElements></a:theme>"#,
        title = palette.title.to_hex(),
        bg = palette.background.to_hex(),
        accent = accent,
    )
}

fn slide_master_xml(palette: &Palette) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:bg><p:bgPr><a:solidFill><a:srgbClr val="{bg}"/></a:solidFill><a:effectLst/></p:bgPr></p:bg><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree></p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/><p:sldLayoutId id="2147483650" r:id="rId2"/></p:sldLayoutIdLst></p:sldMaster>"#,
        bg = palette.background.to_hex(),
    )
}

fn slide_master_rels_xml() -> String {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout2.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/></Relationships>"#
        .to_string()
}

fn slide_layout_xml(layout_type: &str, name: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" type="{layout_type}"><p:cSld name="{name}"><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#,
        layout_type = layout_type,
        name = escape(name),
    )
}

fn slide_layout_rels_xml() -> String {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/></Relationships>"#
        .to_string()
}

fn slide_rels_xml(layout_number: usize, notes_number: Option<usize>) -> String {
    let mut rels = format!(
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout{}.xml"/>"#,
        layout_number
    );
    if let Some(n) = notes_number {
        rels.push_str(&format!(
            r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/notesSlide" Target="../notesSlides/notesSlide{}.xml"/>"#,
            n
        ));
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{rels}</Relationships>"#
    )
}

fn notes_slide_xml(text: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:notes xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/><p:sp><p:nvSpPr><p:cNvPr id="2" name="Notes Placeholder 1"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="body" idx="1"/></p:nvPr></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r><a:rPr lang="en-US"/><a:t>{}</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:notes>"#,
        escape(text)
    )
}

fn notes_slide_rels_xml(slide_number: usize) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/notesMaster" Target="../notesMasters/notesMaster1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="../slides/slide{}.xml"/></Relationships>"#,
        slide_number
    )
}

fn notes_master_xml() -> String {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:notesMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree></p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/></p:notesMaster>"#
        .to_string()
}

fn notes_master_rels_xml() -> String {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/></Relationships>"#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::events::Event;
    use quick_xml::Reader;
    use std::io::Read;
    use zip::ZipArchive;

    fn sample_slides() -> Vec<Slide> {
        vec![
            Slide {
                heading: "Intro".to_string(),
                points: vec!["point A".to_string(), "point B".to_string()],
                visual_suggestion: Some("pie chart".to_string()),
            },
            Slide {
                heading: "Conclusion".to_string(),
                points: vec!["final point".to_string()],
                visual_suggestion: None,
            },
        ]
    }

    fn write_deck(title: &str, slides: &[Slide]) -> ZipArchive<Cursor<Vec<u8>>> {
        let writer = DeckWriter::new(DeckStyle::Professional);
        let bytes = writer.to_bytes(title, slides).unwrap();
        ZipArchive::new(Cursor::new(bytes)).unwrap()
    }

    fn read_part(archive: &mut ZipArchive<Cursor<Vec<u8>>>, path: &str) -> String {
        let mut part = archive.by_name(path).unwrap();
        let mut content = String::new();
        part.read_to_string(&mut content).unwrap();
        content
    }

    /// Collect all text runs (`a:t` content) from a slide part.
    fn text_runs(xml: &str) -> Vec<String> {
        let mut reader = Reader::from_str(xml);
        let mut runs = Vec::new();
        let mut in_run = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) if e.name().as_ref() == b"a:t" => in_run = true,
                Ok(Event::Text(ref e)) if in_run => {
                    runs.push(e.unescape().unwrap().to_string());
                }
                Ok(Event::End(ref e)) if e.name().as_ref() == b"a:t" => in_run = false,
                Ok(Event::Eof) => break,
                Err(e) => panic!("XML error: {}", e),
                _ => {}
            }
        }

        runs
    }

    #[test]
    fn test_package_has_required_parts() {
        let mut archive = write_deck("My Deck", &sample_slides());

        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/theme/theme1.xml",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/slideLayouts/slideLayout2.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/slide2.xml",
            "ppt/slides/slide3.xml",
            "docProps/core.xml",
            "docProps/app.xml",
        ] {
            assert!(archive.by_name(part).is_ok(), "missing part: {}", part);
        }
    }

    #[test]
    fn test_first_slide_is_dedicated_title_slide() {
        let mut archive = write_deck("My Deck", &sample_slides());
        let runs = text_runs(&read_part(&mut archive, "ppt/slides/slide1.xml"));
        assert_eq!(runs, vec!["My Deck", "Generated with AI"]);
    }

    #[test]
    fn test_content_slides_follow_in_order() {
        let mut archive = write_deck("My Deck", &sample_slides());

        let slide2 = text_runs(&read_part(&mut archive, "ppt/slides/slide2.xml"));
        assert_eq!(slide2, vec!["Intro", "point A", "point B"]);

        let slide3 = text_runs(&read_part(&mut archive, "ppt/slides/slide3.xml"));
        assert_eq!(slide3, vec!["Conclusion", "final point"]);
    }

    #[test]
    fn test_visual_suggestion_becomes_notes_slide() {
        let mut archive = write_deck("My Deck", &sample_slides());

        let notes = text_runs(&read_part(&mut archive, "ppt/notesSlides/notesSlide1.xml"));
        assert_eq!(notes, vec!["Visual suggestion: pie chart"]);

        // The noted slide's rels reference the notes part.
        let rels = read_part(&mut archive, "ppt/slides/_rels/slide2.xml.rels");
        assert!(rels.contains("notesSlides/notesSlide1.xml"));

        // The slide without a suggestion has no notes part.
        let rels = read_part(&mut archive, "ppt/slides/_rels/slide3.xml.rels");
        assert!(!rels.contains("notesSlide"));
    }

    #[test]
    fn test_no_notes_parts_when_no_suggestions() {
        let slides = vec![Slide::with_points("Only", vec!["a".to_string()])];
        let mut archive = write_deck("Deck", &slides);

        assert!(archive.by_name("ppt/notesMasters/notesMaster1.xml").is_err());
        assert!(archive.by_name("ppt/notesSlides/notesSlide1.xml").is_err());

        let presentation = read_part(&mut archive, "ppt/presentation.xml");
        assert!(!presentation.contains("notesMasterIdLst"));
    }

    #[test]
    fn test_text_is_escaped() {
        let slides = vec![Slide::with_points(
            "Q&A <open>",
            vec!["x < y".to_string()],
        )];
        let mut archive = write_deck("R&D \"Deck\"", &slides);

        let raw = read_part(&mut archive, "ppt/slides/slide2.xml");
        assert!(raw.contains("Q&amp;A &lt;open&gt;"));

        // Escaped text must round-trip back through an XML reader.
        let runs = text_runs(&raw);
        assert_eq!(runs, vec!["Q&A <open>", "x < y"]);

        let title_runs = text_runs(&read_part(&mut archive, "ppt/slides/slide1.xml"));
        assert_eq!(title_runs[0], "R&D \"Deck\"");
    }

    #[test]
    fn test_presentation_lists_every_slide() {
        let mut archive = write_deck("Deck", &sample_slides());

        let presentation = read_part(&mut archive, "ppt/presentation.xml");
        assert_eq!(presentation.matches("<p:sldId ").count(), 3);

        let rels = read_part(&mut archive, "ppt/_rels/presentation.xml.rels");
        for n in 1..=3 {
            assert!(rels.contains(&format!("slides/slide{}.xml", n)));
        }
    }

    #[test]
    fn test_palette_colors_reach_slides_and_theme() {
        let writer = DeckWriter::new(DeckStyle::Creative);
        let bytes = writer.to_bytes("Deck", &sample_slides()).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        // Creative title color is C00000.
        let slide2 = read_part(&mut archive, "ppt/slides/slide2.xml");
        assert!(slide2.contains(r#"<a:srgbClr val="C00000"/>"#));

        let theme = read_part(&mut archive, "ppt/theme/theme1.xml");
        assert!(theme.contains(r#"<a:srgbClr val="FFC000"/>"#));
    }

    #[test]
    fn test_empty_point_list_still_renders() {
        let slides = vec![Slide::new("Bare heading")];
        let mut archive = write_deck("Deck", &slides);
        let runs = text_runs(&read_part(&mut archive, "ppt/slides/slide2.xml"));
        assert_eq!(runs, vec!["Bare heading"]);
    }
}
