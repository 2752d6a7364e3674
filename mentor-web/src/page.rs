//! The single HTML page: the form plus the two agent outputs.

/// Values shown on the page. All empty for a fresh form.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageView {
    pub user_input: String,
    pub student_output: String,
    pub teacher_feedback: String,
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn section(title: &str, body: &str) -> String {
    if body.is_empty() {
        return String::new();
    }
    format!(
        r#"<section>
<h2>{}</h2>
<pre>{}</pre>
</section>
"#,
        title,
        escape_html(body)
    )
}

pub fn render(view: &PageView) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Mentor: student and teacher agents</title>
<style>
body {{ font-family: sans-serif; max-width: 52rem; margin: 2rem auto; padding: 0 1rem; }}
textarea {{ width: 100%; min-height: 8rem; }}
pre {{ white-space: pre-wrap; background: #f4f4f4; padding: 1rem; }}
</style>
</head>
<body>
<h1>Student / Teacher</h1>
<form method="post" action="/">
<label for="user_input">Task</label>
<textarea id="user_input" name="user_input">{}</textarea>
<button type="submit">Submit</button>
</form>
{}{}</body>
</html>
"#,
        escape_html(&view.user_input),
        section("Student Answer", &view.student_output),
        section("Teacher Feedback", &view.teacher_feedback),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<script>alert("x & 'y'")</script>"#),
            "&lt;script&gt;alert(&quot;x &amp; &#x27;y&#x27;&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn empty_view_has_form_only() {
        let html = render(&PageView::default());
        assert!(html.contains(r#"name="user_input""#));
        assert!(!html.contains("Student Answer"));
        assert!(!html.contains("Teacher Feedback"));
    }

    #[test]
    fn outputs_are_escaped() {
        let html = render(&PageView {
            user_input: "a < b".into(),
            student_output: "<b>bold</b>".into(),
            teacher_feedback: "Score: 7/10".into(),
        });
        assert!(html.contains(">a &lt; b</textarea>"));
        assert!(html.contains("<pre>&lt;b&gt;bold&lt;/b&gt;</pre>"));
        assert!(html.contains("<pre>Score: 7/10</pre>"));
    }
}
