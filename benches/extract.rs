use criterion::{Criterion, criterion_group, criterion_main};
use echosnip::extract::{
    BlockExtractor, BraceExtractor, HtmlTagExtractor, IndentationExtractor, MarkerExtractor,
};
use echosnip::{BlockType, Config, LanguageProfile, SearchRequest, run_search};
use std::fs;
use std::hint::black_box;
use tempfile::TempDir;

fn lines(text: String) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

fn python_source(functions: usize) -> Vec<String> {
    let mut text = String::from("# @snip bench\n");
    for i in 0..functions {
        text.push_str(&format!("def f{i}(x):\n    if x:\n        return {i}\n\n    return x\n"));
    }
    lines(text)
}

fn brace_source(depth: usize) -> Vec<String> {
    let mut text = String::from("// @snip bench\nfn bench() {\n");
    for level in 1..depth {
        text.push_str(&format!("{}if x {{\n", "    ".repeat(level)));
    }
    for level in (1..depth).rev() {
        text.push_str(&format!("{}}}\n", "    ".repeat(level)));
    }
    text.push_str("}\n");
    lines(text)
}

fn html_source(items: usize) -> Vec<String> {
    let mut text = String::from("<!-- @snip bench -->\n<div class=\"list\">\n");
    for i in 0..items {
        text.push_str(&format!("  <div class=\"item\"><span>{i}</span></div>\n"));
    }
    text.push_str("</div>\n");
    lines(text)
}

fn criterion_benchmark(c: &mut Criterion) {
    let python = python_source(500);
    let braces = brace_source(200);
    let html = html_source(500);
    let sql = lines(format!("-- @snip bench\n{}-- @snip END\n", "SELECT 1;\n".repeat(2000)));

    c.bench_function("extract_indentation", |b| {
        b.iter(|| IndentationExtractor.extract(black_box(&python), 0))
    });
    c.bench_function("extract_brace", |b| {
        b.iter(|| BraceExtractor.extract(black_box(&braces), 0))
    });
    let html_extractor = HtmlTagExtractor::new("@snip");
    c.bench_function("extract_html_tag", |b| {
        b.iter(|| html_extractor.extract(black_box(&html), 0))
    });
    let marker_extractor = MarkerExtractor::new("@snip END");
    c.bench_function("extract_marker", |b| {
        b.iter(|| marker_extractor.extract(black_box(&sql), 0))
    });

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    for dir in 0..10 {
        let path = temp_dir.path().join(format!("pkg{dir}"));
        fs::create_dir_all(&path).expect("Failed to create package dir");
        for file in 0..20 {
            let mut text = String::new();
            for i in 0..10 {
                text.push_str(&format!(
                    "#**% handler {dir} {file} {i}\ndef handler_{i}():\n    return {i}\n\n"
                ));
            }
            fs::write(path.join(format!("mod{file}.py")), text).expect("Failed to write file");
        }
    }
    let mut config = Config {
        folder_path: temp_dir.path().to_path_buf(),
        ..Config::default()
    };
    config.languages.insert(
        "Python".to_string(),
        LanguageProfile::new("#", "**%", BlockType::Indentation).with_extensions([".py"]),
    );
    let request = SearchRequest::from_description("handler", "Python");

    c.bench_function("search_tree", |b| {
        b.iter(|| {
            run_search(&config, &request)
                .expect("valid request")
                .count()
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
