use axum::{
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use rust_embed::Embed;

#[derive(Embed)]
#[folder = "static"]
struct WebAssets;

/// Serve the embedded upload page and its assets
pub async fn serve_static(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    // Try exact path first
    if let Some(content) = <WebAssets as Embed>::get(path) {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        return (
            StatusCode::OK,
            [(header::CONTENT_TYPE, mime.as_ref())],
            content.data.into_owned(),
        )
            .into_response();
    }

    // Serve the page shell for any unmatched route
    if let Some(content) = <WebAssets as Embed>::get("index.html") {
        return Html(String::from_utf8_lossy(&content.data).to_string()).into_response();
    }

    // Fallback: a minimal page if the embedded assets are missing
    Html(FALLBACK_HTML.to_string()).into_response()
}

const FALLBACK_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>MediaGuard</title>
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-gray-900 text-white min-h-screen">
    <div class="container mx-auto px-4 py-8 max-w-2xl">
        <header class="mb-8">
            <h1 class="text-4xl font-bold text-blue-400">MediaGuard</h1>
            <p class="text-gray-400 mt-2">Image &amp; text safety analysis</p>
        </header>

        <form id="form" class="bg-gray-800 rounded-lg p-6 space-y-4">
            <div>
                <label class="block text-sm text-gray-400 mb-2">Image (optional)</label>
                <input type="file" id="image" accept="image/*" class="w-full text-sm">
            </div>
            <div>
                <label class="block text-sm text-gray-400 mb-2">Text (optional)</label>
                <textarea id="text" rows="4" class="w-full bg-gray-700 rounded p-2 text-sm"></textarea>
            </div>
            <button type="submit" class="w-full bg-blue-600 hover:bg-blue-700 text-white font-bold py-2 px-4 rounded">
                Analyze
            </button>
        </form>

        <pre id="result" class="mt-6 bg-gray-800 rounded-lg p-6 font-mono text-sm whitespace-pre-wrap"></pre>
    </div>

    <script>
        document.getElementById('form').addEventListener('submit', async (e) => {
            e.preventDefault();
            const data = new FormData();
            const image = document.getElementById('image').files[0];
            const text = document.getElementById('text').value;
            if (image) data.append('image', image);
            if (text.trim()) data.append('text', text);

            const out = document.getElementById('result');
            out.textContent = 'Analyzing...';
            try {
                const response = await fetch('/api/analyze', { method: 'POST', body: data });
                out.textContent = JSON.stringify(await response.json(), null, 2);
            } catch (err) {
                out.textContent = 'Request failed: ' + err.message;
            }
        });
    </script>
</body>
</html>
"#;
