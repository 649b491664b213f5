use lazy_static::lazy_static;
use tera::{Context, Tera};

use crate::sheet::{RegistrationSheet, HEADERS};

static DOCUMENT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html dir="rtl" lang="ar">
<head>
<meta charset="utf-8">
<title>{{ title }}</title>
</head>
<body>
<h1>{{ title }}</h1>
<p>اسم المدرب: {{ summary.coach_name }}</p>
<p>المؤسسة: {{ summary.organization_name }}</p>
<table border="1">
<thead>
<tr>{% for header in headers %}<th>{{ header }}</th>{% endfor %}</tr>
</thead>
<tbody>
{% for row in rows %}<tr><td>{{ row.sequence }}</td><td>{{ row.player_name }}</td><td>{{ row.belt_label }}</td><td>{{ row.birth_date }}</td><td>{{ row.file_number }}</td><td>{{ row.coach_name }}</td><td>{{ row.organization_name }}</td><td>{{ row.period_name }}</td><td>{{ row.registered_at }}</td><td>{{ row.period_start }}</td><td>{{ row.period_end }}</td></tr>
{% endfor %}</tbody>
</table>
<footer>
<p>إجمالي عدد اللاعبين: {{ summary.total_count }}</p>
<p>تاريخ التحميل: {{ summary.generated_at }}</p>
</footer>
</body>
</html>
"#;

lazy_static! {
    static ref TEMPLATES: Tera = {
        let mut tera = Tera::default();
        tera.add_raw_template("registration_document.html", DOCUMENT_TEMPLATE)
            .expect("registration document template is invalid");
        tera
    };
}

/// Renders the sheet as a standalone RTL HTML document: title, metadata
/// paragraphs, one table, footer notes.
pub fn write_document(sheet: &RegistrationSheet) -> Result<String, tera::Error> {
    let mut context = Context::new();
    context.insert("title", &sheet.title);
    context.insert("headers", &HEADERS);
    context.insert("rows", &sheet.rows);
    context.insert("summary", &sheet.summary);
    TEMPLATES.render("registration_document.html", &context)
}
