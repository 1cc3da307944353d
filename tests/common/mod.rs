//! Builds small PDFs in memory for integration tests.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// What to draw on a test page.
pub enum Mark {
    /// A line of text: text, font size, baseline y
    Text(&'static str, i64, i64),
    /// A line shown in two pieces without repositioning
    Split(&'static str, &'static str, i64, i64),
    /// A painted image XObject
    Image,
}

fn operations(marks: &[Mark]) -> Vec<Operation> {
    let mut ops = Vec::new();
    for mark in marks {
        match mark {
            Mark::Text(text, size, y) => {
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new("Tf", vec!["F1".into(), (*size).into()]));
                ops.push(Operation::new("Td", vec![72.into(), (*y).into()]));
                ops.push(Operation::new("Tj", vec![Object::string_literal(*text)]));
                ops.push(Operation::new("ET", vec![]));
            }
            Mark::Split(first, second, size, y) => {
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new("Tf", vec!["F1".into(), (*size).into()]));
                ops.push(Operation::new("Td", vec![72.into(), (*y).into()]));
                ops.push(Operation::new("Tj", vec![Object::string_literal(*first)]));
                ops.push(Operation::new("Tj", vec![Object::string_literal(*second)]));
                ops.push(Operation::new("ET", vec![]));
            }
            Mark::Image => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new("Do", vec!["Im1".into()]));
                ops.push(Operation::new("Q", vec![]));
            }
        }
    }
    ops
}

/// Build a PDF with one page per entry of `pages`.
pub fn build_pdf(pages: &[Vec<Mark>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids: Vec<Object> = Vec::new();
    for marks in pages {
        let content = Content {
            operations: operations(marks),
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("content encodes"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("document saves");
    buffer
}

/// A three-page report with a title, numbered sections and boilerplate.
pub fn sample_report() -> Vec<u8> {
    build_pdf(&[
        vec![
            Mark::Text("Annual Report", 24, 750),
            Mark::Split("1. ", "Introduction", 18, 700),
            Mark::Image,
        ],
        vec![
            Mark::Text("2.1 Background", 14, 750),
            Mark::Text("Copyright Notice 2024", 30, 700),
        ],
        vec![Mark::Text("2.1 Background", 14, 750)],
    ])
}
