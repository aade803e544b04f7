use crate::{index::MediaItem, sampler::public_path};
use html_escape::{encode_double_quoted_attribute, encode_text};
use mime_guess::from_path;

/// HTML page showing one random draw from the index.
pub struct Feed<'a> {
    items: Vec<&'a MediaItem>,
    route: &'a str,
    total_files: usize,
    limit: usize,
}

impl<'a> Feed<'a> {
    pub fn new(
        items: Vec<&'a MediaItem>,
        route: &'a str,
        total_files: usize,
        limit: usize,
    ) -> Self {
        Self {
            items,
            route,
            total_files,
            limit,
        }
    }

    pub fn render(&self) -> String {
        let info_element = format!("<div>{} total files</div>", self.total_files);

        let mut file_elements = String::new();

        for item in &self.items {
            let path = public_path(self.route, item);
            let src = encode_double_quoted_attribute(&path);
            let mime_type = from_path(item.name()).first_or_octet_stream();

            let mut elements = format!(
                r#"<a href="{src}" target="_blank">{}</a>"#,
                encode_text(item.name()),
            );

            match mime_type.type_().as_str() {
                "video" => {
                    elements += &format!(r#"<video src="{src}" controls loop muted></video>"#)
                }
                "audio" => elements += &format!(r#"<audio src="{src}" controls></audio>"#),
                "image" => elements += &format!(r#"<img src="{src}" />"#),
                _ => {}
            }

            file_elements += &format!(r#"<div class="file">{elements}</div>"#);
        }

        let more_element = format!(r#"<a class="more" href="?limit={}">More</a>"#, self.limit);

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
    <head>
        <title>Media Feed</title>
        <meta name="viewport" content="width=device-width, initial-scale=1.0" />
        <style>
            body {{
                font-family: Segoe UI, Arial, Helvetica, sans-serif;
                background-color: #000;
                color: #fff;
            }}

            .container {{
                display: flex;
                flex-direction: column;
                align-items: center;
                gap: 20px;
                margin: 20px;
            }}

            .file {{
                display: flex;
                flex-direction: column;
                align-items: center;
                gap: 10px;
                word-break: break-all;

                a {{
                    color: #ccc;
                    text-decoration: none;
                }}

                img, video {{
                    max-width: 100%;
                    max-height: 90vh;
                    object-fit: contain;
                }}
            }}

            a.more {{
                padding: 10px 20px;
                border-radius: 10px;
                background-color: #3170bd;
                color: #fff;
                text-decoration: none;
            }}
        </style>
    </head>
    <body>
        <div class="container">
            {info_element}
            {file_elements}
            {more_element}
        </div>
    </body>
</html>
"#
        )
    }
}
