use lopdf::Document;
use std::path::Path;
use std::process::Command;

/// Run the pre-built binary directly; returns (stdout, stderr, exit code).
pub fn run_sigfield(args: &[&str]) -> (String, String, i32) {
    let bin = std::path::PathBuf::from(env!("CARGO_BIN_EXE_pdf-sigfield"));

    let output = Command::new(&bin)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute pdf-sigfield");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().expect("process exited by signal");
    (stdout, stderr, code)
}

/// Write a generated document with `page_count` pages to `path`.
pub fn write_fixture(path: &Path, page_count: usize) {
    pdf_sigfield::fixtures::write_document(path, page_count).unwrap();
}

/// The first widget annotation on page 1 of the document at `path`.
pub fn first_widget(path: &Path) -> lopdf::Dictionary {
    let doc = Document::load(path).unwrap();
    let page_id = doc.get_pages()[&1];
    let page = doc.get_dictionary(page_id).unwrap();
    let annots = page.get(b"Annots").unwrap().as_array().unwrap();
    let widget_id = annots[0].as_reference().unwrap();
    doc.get_dictionary(widget_id).unwrap().clone()
}
