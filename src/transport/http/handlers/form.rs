use crate::domain::registration::{FormVariant, SubmissionSummary};
use crate::transport::http::types::AppState;
use axum::extract::State;
use axum::response::Html;

const STANDARD_FIELDS: &str = r#"
      <label>License Expiry
        <input type="date" name="expiry" placeholder="yyyy-mm-dd">
      </label>"#;

const HERITAGE_FIELDS: &str = r#"
      <label>Location <input type="text" name="location"></label>
      <label>Custodial Community <input type="text" name="custodial_community"></label>
      <label>Distribution Region <input type="text" name="distribution_region"></label>
      <label>Species <input type="text" name="species"></label>
      <p class="note">License duration: 1 year from registration.</p>"#;

// Submits through fetch so the result (tx link + summary) renders in place.
// The button stays disabled while a submission is in flight.
const SCRIPT: &str = r#"
const form = document.getElementById('register');
const out = document.getElementById('result');
form.addEventListener('submit', async (e) => {
  e.preventDefault();
  const button = form.querySelector('button');
  button.disabled = true;
  out.textContent = 'Submitting...';
  try {
    const resp = await fetch('/api/register', { method: 'POST', body: new FormData(form) });
    const body = await resp.json();
    if (!body.success) { out.textContent = ''; alert(body.error); return; }
    const d = body.data;
    out.innerHTML = '';
    const link = document.createElement('a');
    link.href = d.explorer_url; link.target = '_blank'; link.rel = 'noopener noreferrer';
    link.textContent = d.tx_hash;
    out.append('Transaction submitted: ', link);
    const heading = document.createElement('h2');
    heading.textContent = 'Submission Summary';
    const list = document.createElement('ul');
    for (const [k, v] of Object.entries(d.summary)) {
      const li = document.createElement('li');
      li.textContent = (LABELS[k] || k) + ': ' + v;
      list.append(li);
    }
    out.append(heading, list);
    form.remove();
  } catch (err) {
    out.textContent = '';
    alert(err);
  } finally {
    button.disabled = false;
  }
});
"#;

/// `{"commercial_use": "Commercial Use", ...}` for the result list.
fn summary_labels_json() -> String {
    let labels: serde_json::Map<String, serde_json::Value> = SubmissionSummary::FIELD_LABELS
        .iter()
        .map(|(key, label)| (key.to_string(), serde_json::Value::from(*label)))
        .collect();
    serde_json::Value::Object(labels).to_string()
}

pub fn render_form_page(variant: FormVariant) -> String {
    let extra = match variant {
        FormVariant::Standard => STANDARD_FIELDS,
        FormVariant::Heritage => HERITAGE_FIELDS,
    };
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Register Your IP</title>
  <style>
    body {{ font-family: sans-serif; background: #f9fafb; }}
    main {{ max-width: 42rem; margin: 2.5rem auto; background: #fff; padding: 2rem; border-radius: .75rem; }}
    label {{ display: block; margin: 1rem 0; }}
    input[type=text], input[type=date] {{ width: 100%; }}
    button {{ width: 100%; padding: .75rem; background: #000; color: #fff; }}
    #result {{ margin-top: 1.5rem; color: #15803d; word-break: break-all; }}
  </style>
</head>
<body>
  <main>
    <h1>Register Your IP</h1>
    <form id="register" enctype="multipart/form-data">
      <input type="hidden" name="variant" value="{variant}">
      <label>Upload File <input type="file" name="file"></label>
      <label>Description
        <input type="text" name="description" placeholder="e.g. Digital artwork, melody, design...">
      </label>
      <label><input type="checkbox" name="commercial_use"> Allow Commercial Use</label>
      <label><input type="checkbox" name="derivatives"> Allow Derivative Works</label>{extra}
      <button type="submit">Register IP</button>
    </form>
    <div id="result"></div>
  </main>
  <script>const LABELS = {labels};{script}</script>
</body>
</html>
"#,
        variant = variant.as_str(),
        extra = extra,
        labels = summary_labels_json(),
        script = SCRIPT,
    )
}

pub async fn form_page_handler(State(state): State<AppState>) -> Html<String> {
    Html(render_form_page(state.registration.variant()))
}
