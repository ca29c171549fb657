use criterion::{black_box, criterion_group, criterion_main, Criterion};

const SIMPLE_DOCUMENT: &str = "<!DOCTYPE html>\
<html><head><title>bench</title></head>\
<body><p>hello <b>world</b></p></body></html>";

fn build_table_heavy_document() -> String {
    let mut source = String::from("<!DOCTYPE html><html><body><table>");
    for row in 0..100 {
        source.push_str("<tr>");
        for column in 0..10 {
            source.push_str(&format!("<td>cell {row},{column}</td>"));
        }
        source.push_str("</tr>");
    }
    source.push_str("</table></body></html>");
    source
}

fn build_formatting_heavy_document() -> String {
    let mut source = String::from("<!DOCTYPE html><body>");
    for _ in 0..200 {
        source.push_str("<p>a<b>b<i>c</b>d</i>e &amp; &notin; f</p>");
    }
    source.push_str("</body>");
    source
}

fn parse_documents(c: &mut Criterion) {
    c.bench_function("parse simple document", |b| {
        b.iter(|| web::parse(black_box(SIMPLE_DOCUMENT)))
    });

    let table_heavy = build_table_heavy_document();
    c.bench_function("parse table heavy document", |b| {
        b.iter(|| web::parse(black_box(&table_heavy)))
    });

    let formatting_heavy = build_formatting_heavy_document();
    c.bench_function("parse misnested formatting", |b| {
        b.iter(|| web::parse(black_box(&formatting_heavy)))
    });
}

criterion_group!(benches, parse_documents);
criterion_main!(benches);
