use askama::Template;

use super::error::ExportError;
use super::types::{CameraPose, Placemark, Tour};

#[derive(Template)]
#[template(path = "tour.kml", escape = "html")]
struct KmlTemplate<'a> {
    name: &'a str,
    poses: Vec<&'a CameraPose>,
    placemarks: Vec<&'a Placemark>,
}

/// Render a tour as a KML 2.2 document with a `gx:Tour` playlist followed by
/// one `Placemark` per fix.
pub fn render_kml(tour: &Tour) -> Result<String, ExportError> {
    let template = KmlTemplate {
        name: &tour.name,
        poses: tour.poses().collect(),
        placemarks: tour.placemarks().collect(),
    };
    Ok(template.render()?)
}
