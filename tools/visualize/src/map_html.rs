//! Leaflet map page: base tiles, heat layer and circle markers.

use anyhow::Result;
use rf_core::{MapLayers, MapStyle};
use serde::Serialize;

const TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>__TITLE__</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
  <script src="https://unpkg.com/leaflet.heat@0.2.0/dist/leaflet-heat.js"></script>
  <style>
    body { margin: 0; font-family: sans-serif; }
    h2 { margin: 8px 12px; }
    #map { width: __WIDTH__px; height: __HEIGHT__px; }
  </style>
</head>
<body>
  <h2>__TITLE__</h2>
  <div id="map"></div>
  <script>
    const view = __VIEW__;
    const map = L.map("map").setView([view.center.lat, view.center.lon], view.zoom);
    L.tileLayer(view.tiles.url, { attribution: view.tiles.attribution }).addTo(map);
    L.heatLayer(view.heat, view.heatOptions).addTo(map);
    for (const m of view.markers) {
      L.circleMarker([m.location.lat, m.location.lon], {
        radius: view.marker.radius,
        color: m.color,
        fill: true,
        fillOpacity: view.marker.fill_opacity,
      })
        .bindPopup(m.tooltip)
        .bindTooltip(m.tooltip)
        .addTo(map);
    }
  </script>
</body>
</html>
"#;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HeatOptions {
    radius: u32,
    blur: u32,
    min_opacity: f64,
    max_zoom: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct View<'a> {
    center: rf_core::LatLon,
    zoom: u32,
    tiles: &'a rf_core::config::TileLayer,
    heat: &'a [rf_core::HeatPoint],
    heat_options: HeatOptions,
    markers: &'a [rf_core::Marker],
    marker: &'a rf_core::config::MarkerStyle,
}

/// Render a standalone HTML page for `layers`.
pub fn render_map(layers: &MapLayers, style: &MapStyle, title: &str) -> Result<String> {
    let view = View {
        center: layers.center,
        zoom: style.zoom_start,
        tiles: &style.tiles,
        heat: &layers.heat,
        heat_options: HeatOptions {
            radius: style.heat.radius,
            blur: style.heat.blur,
            min_opacity: style.heat.min_opacity,
            max_zoom: style.heat.max_zoom,
        },
        markers: &layers.markers,
        marker: &style.marker,
    };
    // "</" inside a JSON string would close the script element early.
    let json = serde_json::to_string(&view)?.replace("</", "<\\/");

    Ok(TEMPLATE
        .replace("__TITLE__", &escape_html(title))
        .replace("__WIDTH__", &style.width.to_string())
        .replace("__HEIGHT__", &style.height.to_string())
        .replace("__VIEW__", &json))
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rf_core::{build_layers, Classifier, Dataset, Metric};

    fn layers() -> MapLayers {
        let ds = Dataset::from_csv_str("Latitude,Longitude,RSRP\n51.5,-0.1,-75\n51.6,-0.2,-95\n").unwrap();
        build_layers(&ds.working_set(), 0, "RSRP", &Classifier::new(Some(Metric::Rsrp))).unwrap()
    }

    #[test]
    fn page_embeds_points_and_style() {
        let html = render_map(&layers(), &MapStyle::default(), "RF Signal Map").unwrap();
        assert!(html.contains("<title>RF Signal Map</title>"));
        assert!(html.contains("[51.5,-0.1,-75.0]"));
        assert!(html.contains("\"minOpacity\":0.5"));
        assert!(html.contains("\"color\":\"green\""));
        assert!(html.contains("RSRP: -95.00"));
        assert!(html.contains("width: 1000px"));
        assert!(!html.contains("__VIEW__"));
    }

    #[test]
    fn title_is_escaped() {
        let html = render_map(&layers(), &MapStyle::default(), "<b>x</b>").unwrap();
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
    }
}
