use askama::Template;
use askama_web::WebTemplate;

pub struct SubjectOption {
    pub id: String,
    pub selected: bool,
}

pub struct DownloadLink {
    pub subject: String,
    /// Path with the subject percent-encoded as a single segment.
    pub href: String,
}

impl DownloadLink {
    pub fn new(subject: &str) -> Self {
        Self {
            subject: subject.to_string(),
            href: format!("/download_kml/{}", urlencoding::encode(subject)),
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub options: Vec<SubjectOption>,
    pub download: Option<DownloadLink>,
    /// Serialized `MapView`, already safe to inline in a script element.
    pub map_json: Option<String>,
}
