use crate::dashboard::{Card, DashboardPage, Section};

pub fn render_index(page: &DashboardPage) -> String {
    INDEX_HTML
        .replace("{{TITLE}}", &escape_html(&page.title))
        .replace("{{PERIOD}}", &escape_html(&page.reporting_period))
        .replace("{{OPTIONS}}", &render_options(page))
        .replace("{{SECTIONS}}", &render_sections(&page.sections))
        .replace("{{RAW}}", &render_raw(page))
        .replace("{{CHARTS_JSON}}", &charts_json(page))
}

fn render_options(page: &DashboardPage) -> String {
    page.weeks
        .iter()
        .map(|week| {
            let selected = if *week == page.reporting_period { " selected" } else { "" };
            let week = escape_html(week);
            format!(r#"<option value="{week}"{selected}>{week}</option>"#)
        })
        .collect::<Vec<_>>()
        .join("\n          ")
}

fn render_sections(sections: &[Section]) -> String {
    sections
        .iter()
        .map(|section| {
            let cards = section.cards.iter().map(render_card).collect::<String>();
            format!(
                r#"<section class="section"><h2>{}</h2><div class="panel">{cards}</div></section>"#,
                escape_html(&section.title)
            )
        })
        .collect::<Vec<_>>()
        .join("\n    ")
}

fn render_card(card: &Card) -> String {
    let delta = match &card.delta {
        Some(delta) => {
            let class = if delta.starts_with('-') { "down" } else { "up" };
            format!(r#"<span class="delta {class}">{}</span>"#, escape_html(delta))
        }
        None => String::new(),
    };
    let caption = card
        .caption
        .as_deref()
        .map(|caption| format!(r#"<span class="caption">{}</span>"#, escape_html(caption)))
        .unwrap_or_default();

    format!(
        r#"<div class="stat"><span class="label">{}</span><span class="value">{}</span>{delta}{caption}</div>"#,
        escape_html(&card.label),
        escape_html(&card.value)
    )
}

fn render_raw(page: &DashboardPage) -> String {
    page.raw
        .iter()
        .map(|row| {
            format!(
                "<tr><th>{}</th><td>{}</td></tr>",
                escape_html(&row.field),
                escape_html(&row.value)
            )
        })
        .collect::<Vec<_>>()
        .join("\n          ")
}

/// Chart data for the inline script; `</` is escaped so no label can close the tag.
fn charts_json(page: &DashboardPage) -> String {
    serde_json::to_string(&page.charts)
        .unwrap_or_else(|_| "[]".to_string())
        .replace("</", "<\\/")
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    :root {
      --bg: #f8f9fa;
      --ink: #212529;
      --muted: #6c757d;
      --border: #dee2e6;
      --accent: #0a2342;
      --up: #2d7a4b;
      --down: #c63b2b;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Inter", "Trebuchet MS", sans-serif;
    }

    .layout {
      display: grid;
      grid-template-columns: 260px 1fr;
      min-height: 100vh;
    }

    aside {
      background: white;
      border-right: 1px solid var(--border);
      padding: 28px 20px;
    }

    aside h2 {
      margin-top: 0;
      font-size: 1.1rem;
    }

    select {
      width: 100%;
      padding: 8px;
      border-radius: 8px;
      border: 1px solid var(--border);
      font: inherit;
    }

    main {
      padding: 32px 40px 48px;
      display: grid;
      gap: 28px;
      align-content: start;
    }

    h1 {
      margin: 0;
      font-weight: 600;
    }

    .period {
      margin: 6px 0 0;
      font-size: 1.1rem;
    }

    .section h2 {
      font-size: 1.3rem;
      font-weight: 600;
      margin: 0 0 14px;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border: 1px solid var(--border);
      border-radius: 8px;
      padding: 16px;
      box-shadow: 0 2px 4px rgba(0, 0, 0, 0.05);
      display: grid;
      gap: 6px;
    }

    .stat .label {
      color: var(--muted);
      font-weight: 500;
      font-size: 0.9rem;
    }

    .stat .value {
      font-weight: 700;
      font-size: 1.8rem;
    }

    .delta {
      font-size: 0.9rem;
      font-weight: 600;
    }

    .delta.up {
      color: var(--up);
    }

    .delta.down {
      color: var(--down);
    }

    .caption {
      color: var(--muted);
      font-size: 0.8rem;
    }

    .tabs {
      display: flex;
      gap: 6px;
      margin-bottom: 12px;
    }

    .tab {
      appearance: none;
      border: 1px solid var(--border);
      background: white;
      border-radius: 999px;
      padding: 8px 14px;
      font: inherit;
      font-weight: 600;
      color: var(--muted);
      cursor: pointer;
    }

    .tab.active {
      color: var(--accent);
      border-color: var(--accent);
    }

    .chart-card {
      background: white;
      border-radius: 8px;
      padding: 16px;
      border: 1px solid var(--border);
    }

    #chart {
      width: 100%;
      height: 300px;
      display: block;
    }

    .chart-bar {
      fill: #2a9d8f;
    }

    .chart-bar.selected {
      fill: #e63946;
    }

    .chart-line {
      fill: none;
      stroke: var(--accent);
      stroke-width: 4;
    }

    .chart-point {
      fill: white;
      stroke: var(--accent);
      stroke-width: 2;
    }

    .chart-point.selected {
      fill: red;
      stroke: red;
    }

    .chart-highlight {
      fill: rgba(255, 0, 0, 0.1);
    }

    .chart-grid {
      stroke: rgba(33, 37, 41, 0.1);
    }

    .chart-label {
      fill: var(--muted);
      font-size: 11px;
    }

    details table {
      border-collapse: collapse;
      margin-top: 12px;
      background: white;
    }

    details th,
    details td {
      text-align: left;
      padding: 6px 14px;
      border-bottom: 1px solid var(--border);
    }

    @media (max-width: 760px) {
      .layout {
        grid-template-columns: 1fr;
      }
      main {
        padding: 24px 18px;
      }
    }
  </style>
</head>
<body>
  <div class="layout">
    <aside>
      <h2>Filters</h2>
      <form method="get" action="/">
        <label for="week"><strong>Select the reporting week:</strong></label>
        <select id="week" name="week" onchange="this.form.submit()">
          {{OPTIONS}}
        </select>
        <noscript><button type="submit">Show</button></noscript>
      </form>
    </aside>

    <main>
    <header>
      <h1>{{TITLE}}</h1>
      <p class="period"><strong>Reporting Period:</strong> {{PERIOD}}</p>
    </header>

    {{SECTIONS}}

    <section class="section">
      <h2>Trends Over Time</h2>
      <div class="tabs" role="tablist" id="tabs"></div>
      <div class="chart-card">
        <svg id="chart" viewBox="0 0 640 300" aria-label="Trend chart" role="img"></svg>
      </div>
    </section>

    <details>
      <summary>View Raw Data for Selected Week</summary>
      <table>
          {{RAW}}
      </table>
    </details>
    </main>
  </div>

  <script id="charts-data" type="application/json">{{CHARTS_JSON}}</script>
  <script>
    const charts = JSON.parse(document.getElementById('charts-data').textContent);
    const chartEl = document.getElementById('chart');
    const tabsEl = document.getElementById('tabs');

    const width = 640;
    const height = 300;
    const paddingX = 56;
    const paddingY = 40;
    const top = 36;

    const formatAxisValue = (value) => Math.round(value).toLocaleString('en-US');

    const renderChart = (chart) => {
      const points = chart.points;
      if (!points.length) {
        chartEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data</text>';
        return;
      }

      const max = Math.max(...points.map((point) => point.value), 1);
      const slot = (width - paddingX * 2) / points.length;
      const scaleY = (height - top - paddingY) / max;
      const x = (index) => paddingX + slot * index + slot / 2;
      const y = (value) => height - paddingY - value * scaleY;

      let body = `<text class="chart-label" x="${paddingX}" y="18">${chart.title}</text>`;

      const ticks = 4;
      for (let i = 0; i <= ticks; i += 1) {
        const value = (max * i) / ticks;
        body += `<line class="chart-grid" x1="${paddingX}" y1="${y(value)}" x2="${width - paddingX}" y2="${y(value)}" />`;
        body += `<text class="chart-label" x="${paddingX - 8}" y="${y(value) + 4}" text-anchor="end">${formatAxisValue(value)}</text>`;
      }

      const selectedIndex = points.findIndex((point) => point.selected);
      if (chart.style === 'bar' && selectedIndex >= 0) {
        body += `<rect class="chart-highlight" x="${x(selectedIndex) - slot / 2}" y="${top}" width="${slot}" height="${height - top - paddingY}" />`;
      }

      if (chart.style === 'bar') {
        const barWidth = slot * 0.6;
        body += points
          .map((point, index) => {
            const cls = point.selected ? 'chart-bar selected' : 'chart-bar';
            return `<rect class="${cls}" x="${x(index) - barWidth / 2}" y="${y(point.value)}" width="${barWidth}" height="${height - paddingY - y(point.value)}" />`;
          })
          .join('');
      } else {
        const path = points
          .map((point, index) => `${index === 0 ? 'M' : 'L'} ${x(index).toFixed(2)} ${y(point.value).toFixed(2)}`)
          .join(' ');
        body += `<path class="chart-line" d="${path}" />`;
        body += points
          .map((point, index) => {
            const cls = point.selected ? 'chart-point selected' : 'chart-point';
            const r = point.selected ? 8 : 4;
            return `<circle class="${cls}" cx="${x(index)}" cy="${y(point.value)}" r="${r}" />`;
          })
          .join('');
      }

      body += points
        .map((point, index) => `<text class="chart-label" x="${x(index)}" y="${height - paddingY + 18}" text-anchor="middle">${point.end_date.slice(5)}</text>`)
        .join('');

      chartEl.innerHTML = body;
    };

    const setActiveTab = (index) => {
      Array.from(tabsEl.children).forEach((button, i) => {
        button.classList.toggle('active', i === index);
        button.setAttribute('aria-selected', String(i === index));
      });
      renderChart(charts[index]);
    };

    charts.forEach((chart, index) => {
      const button = document.createElement('button');
      button.type = 'button';
      button.className = 'tab';
      button.setAttribute('role', 'tab');
      button.textContent = chart.tab;
      button.addEventListener('click', () => setActiveTab(index));
      tabsEl.appendChild(button);
    });

    if (charts.length) {
      setActiveTab(0);
    }
  </script>
</body>
</html>
"#;
