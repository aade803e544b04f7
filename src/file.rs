use crate::server::header;
use anyhow::{Context, Result};
use mime_guess::{Mime, from_path};
use std::{fs::File, path::PathBuf};
use tiny_http::Response;

pub struct MediaFile {
    pub path: PathBuf,
    pub mime: Mime,
    pub size: u64,
    file: File,
}

impl MediaFile {
    pub fn open(path: PathBuf) -> Result<Self> {
        let mime = from_path(&path).first_or_octet_stream();
        let file =
            File::open(&path).with_context(|| format!("Could not open {}", path.display()))?;
        let size = file.metadata()?.len();

        Ok(Self {
            path,
            mime,
            size,
            file,
        })
    }

    pub fn into_response(self) -> Result<Response<File>> {
        let content_type = header("content-type", self.mime.essence_str())?;

        Ok(Response::from_file(self.file).with_header(content_type))
    }
}
