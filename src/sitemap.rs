use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::content::{PageRef, HOME_PAGE_ID};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Build a `urlset` listing every given page under `domain`.
pub fn build_sitemap(domain: &str, pages: &[PageRef], lastmod: NaiveDate) -> Result<String> {
    let domain = domain.trim_end_matches('/');
    let lastmod = lastmod.format("%Y-%m-%d").to_string();

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", SITEMAP_NS));
    writer.write_event(Event::Start(urlset))?;

    for page in pages {
        let home = page.id == HOME_PAGE_ID;
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        text_element(&mut writer, "loc", &format!("{}{}", domain, page.url_path()))?;
        text_element(&mut writer, "lastmod", &lastmod)?;
        text_element(&mut writer, "changefreq", if home { "weekly" } else { "monthly" })?;
        text_element(&mut writer, "priority", if home { "1.0" } else { "0.8" })?;
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;
    Ok(String::from_utf8(writer.into_inner())?)
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
