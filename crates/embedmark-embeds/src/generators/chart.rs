//! TradingView chart widget.

use std::fmt::Write;

use minijinja::{Environment, context};

use crate::provider::Theme;

/// Widget markup. The `.html` name enables auto-escaping.
const TEMPLATE_NAME: &str = "tradingview.html";

const TEMPLATE: &str = r#"<!-- TradingView Widget BEGIN -->
<div class="tradingview-widget-container" style="height:100%;width:100%">
  <div id="{{ id }}" style="height:calc(100% - 32px);width:100%"></div>
  <div class="tradingview-widget-copyright"><a href="https://www.tradingview.com/" rel="noopener nofollow" target="_blank"><span class="blue-text">Track all markets on TradingView</span></a></div>
{%- if load_script %}
  <script type="application/javascript" src="https://s3.tradingview.com/tv.js"></script>
{%- endif %}
  <script type="application/javascript">
  new TradingView.widget({
    "autosize": true,
    "symbol": {{ symbol|tojson }},
    "interval": "D",
    "timezone": "Etc/UTC",
    "theme": {{ theme|tojson }},
    "style": "1",
    "locale": "en",
    "enable_publishing": false,
    "allow_symbol_change": true,
    "container_id": {{ id|tojson }}
  });
  </script>
</div>
<!-- TradingView Widget END -->"#;

/// DOM id of the widget anchor for instance `n`.
pub(crate) fn anchor_id(n: u32) -> String {
    format!("tradingview_{n}")
}

/// Render a chart widget attached to `anchor`.
pub(crate) fn tradingview(
    env: &Environment<'_>,
    anchor: &str,
    symbol: &str,
    theme: Theme,
    load_script: bool,
    out: &mut String,
) -> Result<(), minijinja::Error> {
    let template = env.template_from_named_str(TEMPLATE_NAME, TEMPLATE)?;
    let widget = template.render(context! {
        id => anchor,
        symbol => symbol,
        theme => theme.as_str(),
        load_script => load_script,
    })?;

    write!(
        out,
        r#"<div class="embeded-object-wrapper auto-resize"><div class="embeded-object tradingview-embeded-object no-border">{widget}</div></div>"#
    )
    .unwrap();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(anchor: &str, symbol: &str, theme: Theme, load_script: bool) -> String {
        let env = Environment::new();
        let mut out = String::new();
        tradingview(&env, anchor, symbol, theme, load_script, &mut out).unwrap();
        out
    }

    #[test]
    fn test_widget_fields() {
        let html = render("tradingview_7", "BITFINEX:BTCUSD", Theme::Light, true);
        assert!(html.starts_with(r#"<div class="embeded-object-wrapper auto-resize">"#));
        assert!(html.contains(r#"<div id="tradingview_7" "#));
        assert!(html.contains(r#""symbol": "BITFINEX:BTCUSD","#));
        assert!(html.contains(r#""theme": "light","#));
        assert!(html.contains(r#""container_id": "tradingview_7""#));
        assert!(html.contains("https://s3.tradingview.com/tv.js"));
    }

    #[test]
    fn test_widget_without_loader_script() {
        let html = render("tradingview_0", "NASDAQ:AAPL", Theme::Dark, false);
        assert!(!html.contains("tv.js"));
        assert!(html.contains("new TradingView.widget"));
    }

    #[test]
    fn test_symbol_cannot_close_script() {
        let html = render("tradingview_0", "</script><b>", Theme::Dark, true);
        assert!(!html.contains("</script><b>"));
    }

    #[test]
    fn test_anchor_id_format() {
        assert_eq!(anchor_id(42), "tradingview_42");
    }
}
