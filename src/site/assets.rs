//! Static assets shared by every generated page.

pub const STYLESHEET: &str = r#"* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    line-height: 1.6;
    color: #333;
    background: #f5f5f5;
}

.container {
    max-width: 1400px;
    margin: 0 auto;
    padding: 20px;
}

header {
    background: #2c3e50;
    color: white;
    padding: 20px 0;
    margin-bottom: 30px;
    box-shadow: 0 2px 4px rgba(0,0,0,0.1);
}

header h1 {
    margin: 0;
    font-size: 28px;
}

header p {
    margin: 5px 0 0;
    opacity: 0.9;
    font-size: 14px;
}

nav {
    background: white;
    padding: 15px;
    margin-bottom: 30px;
    border-radius: 8px;
    box-shadow: 0 2px 4px rgba(0,0,0,0.1);
}

nav a {
    color: #3498db;
    text-decoration: none;
    margin-right: 20px;
    font-weight: 500;
}

nav a:hover {
    text-decoration: underline;
}

.card {
    background: white;
    border-radius: 8px;
    padding: 20px;
    margin-bottom: 20px;
    box-shadow: 0 2px 4px rgba(0,0,0,0.1);
}

.card h2 {
    margin-bottom: 15px;
    color: #2c3e50;
    border-bottom: 2px solid #3498db;
    padding-bottom: 10px;
}

.card h3 {
    margin: 20px 0 10px;
    color: #34495e;
    font-size: 18px;
}

table {
    width: 100%;
    border-collapse: collapse;
    margin: 15px 0;
}

th {
    background: #34495e;
    color: white;
    padding: 10px;
    text-align: left;
    font-weight: 600;
}

td {
    padding: 10px;
    border-bottom: 1px solid #ecf0f1;
}

tr:hover {
    background: #f8f9fa;
}

td a {
    color: #3498db;
    text-decoration: none;
}

td a:hover {
    text-decoration: underline;
}

.summary-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
    gap: 15px;
    margin: 15px 0;
}

.summary-item {
    background: #f8f9fa;
    border-left: 4px solid #3498db;
    border-radius: 4px;
    padding: 15px;
}

.summary-item .value {
    font-size: 24px;
    font-weight: bold;
    color: #2c3e50;
}

.summary-item .label {
    font-size: 13px;
    color: #7f8c8d;
}

.badge {
    display: inline-block;
    background: #ecf0f1;
    color: #2c3e50;
    border-radius: 4px;
    padding: 2px 8px;
    font-size: 12px;
    margin-right: 4px;
}

pre {
    background: #2c3e50;
    color: #ecf0f1;
    border-radius: 4px;
    padding: 15px;
    overflow-x: auto;
    font-family: 'Consolas', 'Courier New', monospace;
    font-size: 13px;
}

.muted {
    color: #95a5a6;
}

.diagram-wrap {
    overflow-x: auto;
}
"#;
