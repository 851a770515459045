//! Shared helpers for integration tests.
//!
//! Fixture PDFs are generated on the fly. Every page carries a `/Tag`
//! string (`<label>-<n>`) so tests can check which pages ended up in an
//! output and in what order.

#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use std::path::{Path, PathBuf};

use pdfops::config::OutputOptions;
use pdfops::io::{PdfReader, PdfWriter};
use pdfops::pages;

/// Build a document with `pages` US Letter pages tagged `<label>-<n>`.
pub fn tagged_document(label: &str, pages: usize) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut kids = Vec::new();

    for n in 1..=pages {
        let content = format!("BT /F1 24 Tf 72 700 Td ({label} page {n}) Tj ET");
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Tag" => Object::string_literal(format!("{label}-{n}")),
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Id of the root `/Pages` node of `doc`.
pub fn root_pages(doc: &Document) -> ObjectId {
    pages::root_pages_id(doc).expect("document has a page tree")
}

/// Write `doc` to `dir/name`.
pub fn write_document(dir: &Path, name: &str, mut doc: Document) -> PathBuf {
    let path = dir.join(name);
    doc.save(&path).expect("failed to write fixture");
    path
}

/// Write a tagged fixture to `dir/name`.
pub fn write_tagged_pdf(dir: &Path, name: &str, label: &str, pages: usize) -> PathBuf {
    write_document(dir, name, tagged_document(label, pages))
}

/// Write a tagged fixture encrypted with `password`.
pub async fn write_encrypted_pdf(
    dir: &Path,
    name: &str,
    label: &str,
    pages: usize,
    password: &str,
) -> PathBuf {
    let path = dir.join(name);
    PdfWriter::encrypting(Some(password))
        .save(tagged_document(label, pages), &path)
        .await
        .expect("failed to write encrypted fixture");
    path
}

/// Open a written PDF, unlocking it with `password` if needed.
pub async fn open(path: &Path, password: Option<&str>) -> Document {
    PdfReader::new()
        .open(path, password)
        .await
        .expect("failed to open output")
        .document
}

/// Page tags of `doc` in page order.
pub fn tags(doc: &Document) -> Vec<String> {
    pages::page_ids(doc)
        .into_iter()
        .map(|id| {
            let page = doc.get_dictionary(id).expect("page dictionary");
            let tag = page.get(b"Tag").and_then(Object::as_str).expect("page tag");
            String::from_utf8_lossy(tag).into_owned()
        })
        .collect()
}

/// Effective rotation of every page of `doc`.
pub fn rotations(doc: &Document) -> Vec<i64> {
    pages::page_ids(doc)
        .into_iter()
        .map(|id| pages::rotation(doc, id))
        .collect()
}

/// Expected tags `<label>-<first>` through `<label>-<last>`.
pub fn expected_tags(label: &str, first: usize, last: usize) -> Vec<String> {
    (first..=last).map(|n| format!("{label}-{n}")).collect()
}

/// Default output options for `path`.
pub fn output(path: &Path) -> OutputOptions {
    OutputOptions::new(path)
}
