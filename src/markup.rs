//! HTML partials for the page templates.
//!
//! Each fragment carries exactly the ids, classes and data attributes the
//! widgets bind to (see [`crate::widgets::dom`]), so templates include them
//! as-is. Rendered with Maud; every interpolated value is escaped.
//!
//! ```text
//! public/partials/
//! ├── lightbox.html        # modal shell, hidden
//! ├── booking-popup.html   # form with lesson types from rsm-site.toml
//! ├── hero.html            # banner with data-hero-images
//! └── gallery.html         # only when sections.gallery.images is set
//! ```

use crate::config::{LessonTypeOption, ToolConfig};
use crate::contact::ContactMethod;
use crate::hero::HeroImage;
use crate::site::{GalleryImage, SiteDocument, SiteError};
use crate::widgets::dom::{id_of, selectors};
use maud::{Markup, html};
use std::fs;
use std::path::{Path, PathBuf};

pub const PARTIALS_DIR: &str = "partials";

const MODAL_ROOT_CLASS: &str = "fixed inset-0 z-50 hidden items-center justify-center bg-black/80 opacity-0 transition-opacity duration-300";
const MODAL_PANEL_CLASS: &str = "relative transform scale-95 transition-transform duration-300";

pub fn lightbox_modal() -> Markup {
    html! {
        div id=(id_of(selectors::LIGHTBOX)) class=(MODAL_ROOT_CLASS) role="dialog" aria-modal="true" aria-label="Image viewer" {
            div class=(MODAL_PANEL_CLASS) {
                button id=(id_of(selectors::LIGHTBOX_CLOSE)) type="button" aria-label="Close" { "×" }
                button id=(id_of(selectors::LIGHTBOX_PREV)) type="button" aria-label="Previous image" { "‹" }
                figure {
                    img id=(id_of(selectors::LIGHTBOX_IMAGE)) class="max-h-[80vh] max-w-full transition-opacity duration-100" src="" alt="";
                    figcaption id=(id_of(selectors::LIGHTBOX_CAPTION)) class="mt-2 text-center text-white" {}
                }
                button id=(id_of(selectors::LIGHTBOX_NEXT)) type="button" aria-label="Next image" { "›" }
            }
        }
    }
}

/// Gallery grid; items past `visible` start hidden behind the show-more button.
pub fn gallery_grid(images: &[GalleryImage], visible: usize) -> Markup {
    html! {
        div id=(id_of(selectors::GALLERY_GRID)) class="grid grid-cols-2 gap-4 md:grid-cols-3" role="list" aria-label="Photo gallery" {
            @for (index, image) in images.iter().enumerate() {
                div class=(gallery_item_class(index >= visible)) role="listitem" data-gallery-index=(index) {
                    button type="button" data-lightbox-trigger data-image=(image.src) data-alt=(image.alt) data-caption=(image.caption) data-index=(index) {
                        img src=(image.src) alt=(image.alt) loading="lazy" class="h-full w-full object-cover";
                    }
                }
            }
        }
        @if images.len() > visible {
            button id=(id_of(selectors::SHOW_MORE_GALLERY)) type="button" { "Show more" }
        }
    }
}

fn gallery_item_class(hidden: bool) -> &'static str {
    if hidden {
        "aspect-square overflow-hidden rounded hidden"
    } else {
        "aspect-square overflow-hidden rounded"
    }
}

/// Hero banner showing `initial`, with the whole pool for the page-load swap.
pub fn hero_container(images: &[HeroImage], initial: &HeroImage) -> Result<Markup, SiteError> {
    let pool = serde_json::to_string(images)?;
    Ok(html! {
        div class="hero-image absolute inset-0" data-hero-images=(pool) {
            img src=(initial.src) alt=(initial.alt()) class=(initial.class_name());
        }
    })
}

/// The hero banner for a site: the image of the day, or the first pool entry
/// when none has been featured yet.
pub fn site_hero(document: &SiteDocument) -> Result<Markup, SiteError> {
    let images = document.hero_images()?;
    let initial = document
        .image_of_the_day()
        .or_else(|| images.first().cloned())
        .ok_or(SiteError::NoHeroImages)?;
    hero_container(&images, &initial)
}

pub fn booking_popup(lesson_types: &[LessonTypeOption]) -> Markup {
    html! {
        div id=(id_of(selectors::BOOKING_POPUP)) class=(MODAL_ROOT_CLASS) role="dialog" aria-modal="true" aria-labelledby="booking-title" {
            div class=(format!("{MODAL_PANEL_CLASS} w-full max-w-md rounded-lg bg-white p-6")) {
                button id=(id_of(selectors::BOOKING_CLOSE)) type="button" aria-label="Close" { "×" }
                h2 id="booking-title" class="mb-4 text-xl font-bold" { "Book a Lesson" }
                form id=(id_of(selectors::BOOKING_FORM)) {
                    label for=(id_of(selectors::STUDENT_NAME)) { "Your name" }
                    input id=(id_of(selectors::STUDENT_NAME)) name="name" type="text" autocomplete="name" required;
                    label for=(id_of(selectors::LESSON_DATE)) { "Preferred date" }
                    input id=(id_of(selectors::LESSON_DATE)) name="date" type="date" required;
                    label for=(id_of(selectors::LESSON_TYPE)) { "Lesson type" }
                    select id=(id_of(selectors::LESSON_TYPE)) name="lessonType" {
                        @for option in lesson_types {
                            option value=(option.value) { (option.label) }
                        }
                    }
                    div class="mt-4 grid gap-2" {
                        @for method in ContactMethod::ALL {
                            button id=(method.button_id()) type="button" { (contact_button_label(method)) }
                        }
                    }
                }
            }
        }
    }
}

fn contact_button_label(method: ContactMethod) -> &'static str {
    match method {
        ContactMethod::Email => "Send by Email",
        ContactMethod::Sms => "Send by Text",
        ContactMethod::WhatsApp => "Send on WhatsApp",
    }
}

/// Render every partial into `<public_dir>/partials/`, returning the written paths.
pub fn write_partials(
    document: &SiteDocument,
    config: &ToolConfig,
    public_dir: &Path,
) -> Result<Vec<PathBuf>, SiteError> {
    let gallery = document.gallery_images()?;

    let mut partials = vec![
        ("lightbox.html", lightbox_modal()),
        ("booking-popup.html", booking_popup(&config.booking.lesson_types)),
        ("hero.html", site_hero(document)?),
    ];
    if !gallery.is_empty() {
        partials.push((
            "gallery.html",
            gallery_grid(&gallery, config.randomizers.gallery_visible),
        ));
    }

    let dir = public_dir.join(PARTIALS_DIR);
    fs::create_dir_all(&dir)?;
    let mut written = Vec::with_capacity(partials.len());
    for (name, markup) in partials {
        let path = dir.join(name);
        fs::write(&path, markup.into_string())?;
        written.push(path);
    }
    Ok(written)
}
