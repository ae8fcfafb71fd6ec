use std::path::Path;

const DOCX_SUFFIX: &str = ".docx";
const PDF_SUFFIX: &str = ".pdf";

/// Replaces a trailing `.docx` with `.pdf`. Names without the suffix get
/// `.pdf` appended so the saved file still opens as a PDF.
pub fn pdf_file_name(docx_name: &str) -> String {
    match docx_name.strip_suffix(DOCX_SUFFIX) {
        Some(stem) => format!("{stem}{PDF_SUFFIX}"),
        None => format!("{docx_name}{PDF_SUFFIX}"),
    }
}

/// Final path component only, so a name can never escape the target dir.
pub fn sanitize_file_name(name: &str) -> Option<String> {
    let last = name.rsplit(['/', '\\']).next()?;
    let last = Path::new(last).file_name()?.to_str()?;
    if last.is_empty() {
        None
    } else {
        Some(last.to_string())
    }
}

/// `report.pdf` -> `report (2).pdf`, the way browsers name repeat downloads.
pub fn numbered_file_name(name: &str, n: usize) -> String {
    match name.rfind('.') {
        Some(dot) if dot > 0 => format!("{} ({n}){}", &name[..dot], &name[dot..]),
        _ => format!("{name} ({n})"),
    }
}
