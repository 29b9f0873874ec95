use anyhow::{bail, Context, Result};
use search_core::{paginate, DocId, DocumentStatus, RequestQueue, SearchServer};
use serde::Deserialize;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InputDoc {
    pub id: DocId,
    #[serde(alias = "body")]
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

/// `.json` and `.jsonl` files under `input` (or `input` itself), in path order.
/// Fails when `input` is neither a file nor a directory.
pub fn collect_input_files(input: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        bail!("input path {} is neither a file nor a directory", input.display());
    }
    Ok(files)
}

/// Reads a JSONL file line by line, or a JSON file holding one document or an array.
pub fn read_documents(file: &Path) -> Result<Vec<InputDoc>> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
        let mut docs = Vec::new();
        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() { continue; }
            let doc: InputDoc = serde_json::from_str(&line)
                .with_context(|| format!("{}:{}: malformed document", file.display(), lineno + 1))?;
            docs.push(doc);
        }
        return Ok(docs);
    }
    let json: serde_json::Value =
        serde_json::from_reader(reader).with_context(|| format!("parsing {}", file.display()))?;
    let docs = match json {
        serde_json::Value::Array(arr) => {
            arr.into_iter().map(serde_json::from_value).collect::<Result<Vec<InputDoc>, _>>()?
        }
        serde_json::Value::Object(_) => vec![serde_json::from_value(json)?],
        _ => vec![],
    };
    Ok(docs)
}

/// Builds the index from every document found under `input`.
pub fn build_server(stop_words: &str, input: Option<&Path>) -> Result<SearchServer> {
    let mut server = SearchServer::from_stop_words_text(stop_words)?;
    let Some(input) = input else { return Ok(server) };
    for file in collect_input_files(input)? {
        for doc in read_documents(&file)? {
            server
                .add_document(doc.id, &doc.text, doc.status, &doc.ratings)
                .with_context(|| format!("indexing document {} from {}", doc.id, file.display()))?;
        }
    }
    tracing::info!(documents = server.document_count(), "index ready");
    Ok(server)
}

pub fn run_query(server: &SearchServer, query: &str, status: DocumentStatus, page_size: usize, json: bool) -> Result<String> {
    let docs = server.find_top_documents_by_status(query, status)?;
    let pages = paginate(&docs, page_size)?;
    if json {
        return Ok(serde_json::to_string_pretty(&docs)?);
    }
    let mut out = String::new();
    if docs.is_empty() {
        writeln!(out, "no documents found")?;
        return Ok(out);
    }
    for (i, page) in pages.iter().enumerate() {
        writeln!(out, "page {} ({}/{})", i + 1, page.len(), page.capacity())?;
        for doc in page {
            writeln!(out, "{doc}")?;
        }
    }
    Ok(out)
}

pub fn run_match(server: &SearchServer, query: &str, id: DocId) -> Result<String> {
    let (words, status) = server.match_document(query, id)?;
    Ok(format!("{{ document_id = {id}, status = {status}, words = [{}] }}\n", words.join(", ")))
}

/// Feeds each non-empty line of `queries` through a request queue.
pub fn run_replay(server: &SearchServer, queries: &Path) -> Result<String> {
    let text = fs::read_to_string(queries).with_context(|| format!("reading {}", queries.display()))?;
    let mut queue = RequestQueue::new(server);
    let mut out = String::new();
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let docs = queue.add_find_request(line).with_context(|| format!("query {line:?}"))?;
        writeln!(out, "{line}: {} results", docs.len())?;
    }
    writeln!(out, "no-result requests: {}", queue.no_result_requests())?;
    Ok(out)
}
