use sentiplot_model::DatasetDescriptor;

use super::RenderError;

pub const CHART_LIBRARY_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js";

const STYLE: &str = r"
        body {
            font-family: Arial, sans-serif;
            margin: 20px;
            background-color: #f5f5f5;
        }
        .container {
            max-width: 1200px;
            margin: 0 auto;
            background-color: white;
            padding: 20px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        h1 {
            text-align: center;
            color: #333;
            margin-bottom: 30px;
        }
        .chart-container {
            position: relative;
            height: 600px;
            margin: 20px 0;
        }
        .info {
            background-color: #e3f2fd;
            padding: 15px;
            border-radius: 5px;
            margin-bottom: 20px;
        }
        .info h3 {
            margin-top: 0;
            color: #1976d2;
        }
        .data-section {
            margin-top: 40px;
        }
        .stock-box {
            background-color: #f8f9fa;
            border: 1px solid #dee2e6;
            border-radius: 8px;
            padding: 20px;
            margin-bottom: 20px;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
        }
        .stock-header {
            font-size: 1.4em;
            font-weight: bold;
            color: #333;
            margin-bottom: 15px;
            border-bottom: 2px solid #007bff;
            padding-bottom: 8px;
        }
        .stock-metrics {
            display: flex;
            gap: 30px;
            margin-bottom: 15px;
        }
        .metric, .summary, .links {
            background-color: white;
            border-radius: 5px;
            border: 1px solid #e0e0e0;
        }
        .metric {
            padding: 10px 15px;
        }
        .metric-label {
            font-weight: bold;
            color: #666;
            font-size: 0.9em;
        }
        .metric-value {
            font-size: 1.2em;
            color: #333;
            margin-top: 5px;
        }
        .summary, .links {
            padding: 15px;
        }
        .summary {
            margin-bottom: 15px;
        }
        .summary h4, .links h4 {
            margin-top: 0;
            color: #333;
        }
        .links ul {
            margin: 10px 0;
            padding-left: 20px;
        }
        .links li {
            margin-bottom: 8px;
        }
        .links a {
            color: #007bff;
            text-decoration: none;
        }
        .links a:hover {
            text-decoration: underline;
        }
        .no-links {
            color: #6c757d;
            font-style: italic;
        }
";

/// Serializes datasets for embedding inside a `<script>` element.
///
/// `<` only ever appears inside JSON strings, so escaping it as `\u003c`
/// keeps the JSON equivalent while preventing `</script>` from closing the
/// element early.
pub(super) fn script_json(datasets: &[DatasetDescriptor]) -> Result<String, RenderError> {
    let json = serde_json::to_string(datasets)?;
    Ok(json.replace('<', "\\u003c"))
}

/// Interpolates escaped title, dataset JSON and panel markup into the page.
pub(super) fn assemble(title: &str, datasets_json: &str, panels_html: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <script src="{CHART_LIBRARY_URL}"></script>
    <style>{STYLE}    </style>
</head>
<body>
    <div class="container">
        <h1>{title}</h1>

        <div class="info">
            <h3>Chart Information</h3>
            <p><strong>X-axis (Sentiment):</strong> -1.0 (Very Negative) to 1.0 (Very Positive)</p>
            <p><strong>Y-axis (Presence):</strong> 0.0 (Low Presence) to 1.0 (High Presence)</p>
            <p><strong>Point Size:</strong> Represents the presence level of each stock</p>
        </div>

        <div class="chart-container">
            <canvas id="sentimentChart"></canvas>
        </div>

        <div class="data-section">
            <h2>Stock Analysis Details</h2>
            {panels_html}
        </div>
    </div>

    <script>
        const ctx = document.getElementById('sentimentChart').getContext('2d');
        const chart = new Chart(ctx, {{
            type: 'scatter',
            data: {{
                datasets: {datasets_json}
            }},
            options: {{
                responsive: true,
                maintainAspectRatio: false,
                plugins: {{
                    title: {{
                        display: true,
                        text: 'Stock Sentiment vs Presence Analysis',
                        font: {{
                            size: 16
                        }}
                    }},
                    legend: {{
                        display: true,
                        position: 'right'
                    }},
                    tooltip: {{
                        callbacks: {{
                            label: function(context) {{
                                const label = context.dataset.label || '';
                                const x = context.parsed.x.toFixed(2);
                                const y = context.parsed.y.toFixed(2);
                                return `${{label}}: Sentiment ${{x}}, Presence ${{y}}`;
                            }}
                        }}
                    }}
                }},
                scales: {{
                    x: {{
                        type: 'linear',
                        position: 'bottom',
                        title: {{
                            display: true,
                            text: 'Sentiment (-1.0 to 1.0)'
                        }},
                        min: -1.1,
                        max: 1.1,
                        grid: {{
                            color: function(context) {{
                                return context.tick.value === 0 ? '#666' : '#e0e0e0';
                            }},
                            lineWidth: function(context) {{
                                return context.tick.value === 0 ? 2 : 1;
                            }}
                        }}
                    }},
                    y: {{
                        title: {{
                            display: true,
                            text: 'Presence (0.0 to 1.0)'
                        }},
                        min: 0,
                        max: 1.1,
                        grid: {{
                            color: '#e0e0e0'
                        }}
                    }}
                }},
                interaction: {{
                    intersect: false,
                    mode: 'point'
                }}
            }}
        }});
    </script>
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_json_cannot_close_the_script_element() {
        let record = sentiplot_model::RawRecord {
            symbol: "</script><script>alert(1)</script> (XSS)".to_string(),
            sentiment: 0.0,
            presence: 0.0,
            summary: String::new(),
            links: Vec::new(),
        }
        .validate()
        .expect("valid record");
        let color = sentiplot_model::Color::parse("#000000").expect("color");
        let dataset = DatasetDescriptor::from_record(&record, &color);

        let json = script_json(&[dataset]).expect("serialize");
        assert!(!json.contains("</script>"));
        let back: serde_json::Value = serde_json::from_str(&json).expect("still valid json");
        assert_eq!(back[0]["label"], "</script><script>alert(1)</script> (XSS)");
    }

    #[test]
    fn empty_dataset_list_serializes_as_empty_array() {
        assert_eq!(script_json(&[]).expect("serialize"), "[]");
    }

    #[test]
    fn document_declares_axes_legend_and_tooltip() {
        let html = assemble("Title", "[]", "");
        assert!(html.contains("datasets: []"));
        assert!(html.contains("min: -1.1,\n                        max: 1.1,"));
        assert!(html.contains("min: 0,\n                        max: 1.1,"));
        assert!(html.contains("position: 'right'"));
        assert!(html.contains("context.tick.value === 0 ? 2 : 1"));
        assert!(html.contains("`${label}: Sentiment ${x}, Presence ${y}`"));
        assert!(html.contains(CHART_LIBRARY_URL));
    }
}
