//! Document head: inline stylesheet with the team colors baked in.

use serde::{Deserialize, Serialize};

use super::html::escape_text;
use crate::game::{Color, Shade, StoredGameView, TeamType};

/// Report colors that do not come from the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Card background.
    pub background: Color,
    /// Text and border color on cards.
    pub on_background: Color,
    /// Guest color used when both teams wear the same color.
    pub duplicate: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            on_background: Color::from_rgb(0x21, 0x21, 0x21),
            duplicate: Color::from_rgb(0x9e, 0x9e, 0x9e),
        }
    }
}

impl Palette {
    /// Readable text color on `background`.
    #[must_use]
    pub fn text_on(&self, background: Color) -> Color {
        match background.shade() {
            Shade::White => Color::WHITE,
            Shade::Gray => self.on_background,
        }
    }

    /// Background color of a team's cells, after duplicate resolution.
    #[must_use]
    pub fn team_color<G: StoredGameView + ?Sized>(&self, game: &G, team: TeamType) -> Color {
        let color = game.team_color(team);
        if team == TeamType::Guest && color == game.team_color(TeamType::Home) {
            self.duplicate
        } else {
            color
        }
    }
}

/// Icon classes, drawn with plain CSS.
const ICONS_CSS: &str = "\
      .timeout-white-image, .timeout-gray-image { display:inline-block; width:14px; height:14px; border-radius:50%; box-sizing:border-box; }
      .timeout-white-image { border:3px solid #ffffff; }
      .timeout-gray-image { border:3px solid #616161; }
      .service-white-image, .service-gray-image { display:inline-block; width:10px; height:10px; border-radius:50%; }
      .service-white-image { background-color:#ffffff; }
      .service-gray-image { background-color:#616161; }
      .substitution-image { width:16px; height:16px; margin:auto; text-align:center; }
      .substitution-image::before { content:'\\21C4'; }
      .yellow-card-image, .red-card-image, .expulsion-card-image, .disqualification-card-image,
      .delay-warning-image, .delay-penalty-image { width:12px; height:16px; margin:auto; border-radius:2px; }
      .yellow-card-image { background-color:#fdd835; }
      .red-card-image { background-color:#e53935; }
      .expulsion-card-image { background:linear-gradient(90deg, #fdd835 50%, #e53935 50%); }
      .disqualification-card-image { background:linear-gradient(90deg, #fdd835 50%, #e53935 50%); outline:2px solid #212121; }
      .delay-warning-image { background-color:#fdd835; border-radius:50%; width:16px; }
      .delay-penalty-image { background-color:#e53935; border-radius:50%; width:16px; }
      .vbr-logo-image { width:16px; height:16px; margin-left:6px; border-radius:50%; background-color:#f57c00; }
";

fn rule(css: &mut String, selector: &str, body: &str) {
    css.push_str("      ");
    css.push_str(selector);
    css.push_str(" { ");
    css.push_str(body);
    css.push_str(" }\n");
}

/// Everything from `<!doctype html>` up to and including `</head>`.
#[must_use]
pub fn document_head<G: StoredGameView + ?Sized>(
    game: &G,
    palette: &Palette,
    title: &str,
) -> String {
    let ink = palette.on_background;
    let mut css = String::new();

    rule(&mut css, "html *", "font-family: Roboto, Arial, sans-serif; font-size: 12px !important;");
    rule(&mut css, ".vbr-body", &format!("color: {ink}; width: 28cm; max-width: 28cm; margin-left:auto; margin-right:auto;"));
    rule(&mut css, ".vbr-captain", "text-decoration: underline;");

    for team in [TeamType::Home, TeamType::Guest] {
        let background = palette.team_color(game, team);
        rule(
            &mut css,
            &format!(".vbr-{team}-team"),
            &format!("color:{}; background-color:{background};", palette.text_on(background)),
        );
        let libero = game.libero_color(team);
        rule(
            &mut css,
            &format!(".vbr-{team}-libero"),
            &format!("color:{}; background-color:{libero};", palette.text_on(libero)),
        );
    }

    rule(&mut css, ".div-card", &format!("background-color:{}; padding:6px; margin:6px; box-shadow:0 1px 3px rgba(0,0,0,.12), 0 1px 2px rgba(0,0,0,.24);", palette.background));
    css.push_str(
        "      .div-title { font-weight:700; margin-bottom:6px; }
      .div-grid-h-g { display:grid; grid-template-columns:4fr 1fr 4fr; align-items:stretch; }
      .div-grid-1-2-3 { display:grid; grid-template-columns:4fr 1fr 4fr 1fr 4fr; align-items:stretch; }
      .div-grid-game-header-logo { display:grid; grid-template-columns:4fr 6fr; align-items:stretch; }
      .div-grid-game-header-info { display:grid; grid-template-columns:40fr 20fr 20fr 8fr 12fr; align-items:stretch; }
      .div-grid-sets-info { display:grid; grid-template-columns:40fr 5fr 5fr 5fr 5fr 5fr 5fr 10fr 20fr; align-items:stretch; }
      .div-flex-row { display:flex; flex-flow:row wrap; align-items:flex-start; }
      .div-flex-column { display:flex; flex-flow:column wrap; align-items:flex-start; }
      .div-grid-team { display:grid; grid-template-columns:1fr 8fr 1fr 8fr; align-items:center; }
      .div-grid-set-header-info { min-width:175px; display:grid; grid-template-columns:3fr 1fr; }
      .div-grid-set-header-time { min-width:250px; display:grid; grid-template-columns:7fr 3fr; }
      .set-index-cell { grid-row:1 / span 2; line-height:44px; }
      .div-grid-lineup { display:grid; grid-template-columns:1fr 1fr 1fr; align-items:center; }
      .div-grid-substitution { display:grid; grid-template-columns:24fr 16fr 24fr 34fr; align-items:center; }
      .div-grid-timeout { display:grid; grid-template-columns:1fr 2fr; align-items:center; }
      .div-grid-sanction { display:grid; grid-template-columns:3fr 2fr 4fr; align-items:center; }
      .div-grid-signature { display:grid; grid-template-columns:2fr 5fr; align-items:stretch; }
      .div-footer { font-size:10px; position:fixed; display:flex; align-items:center; bottom:12px; right:12px; }
      .cell { min-width:22px; text-align:center; padding:3px; }
",
    );
    rule(&mut css, ".bordered-cell", &format!("border:1px solid {ink}; min-width:22px; text-align:center; padding:3px; margin-right:-1px; margin-left:-1px;"));
    rule(&mut css, ".remarks-cell", &format!("border:1px solid {ink}; padding:3px; min-height:40px;"));
    rule(&mut css, ".signature-title-cell", &format!("border:1px solid {ink}; grid-row:1 / span 2; height:82px; text-align:center; padding:3px; margin:0 -1px;"));
    rule(&mut css, ".signature-name-cell", &format!("border:1px solid {ink}; height:14px; line-height:14px; text-align:center; padding:3px; margin:0 -1px;"));
    rule(&mut css, ".signature-cell", &format!("border:1px solid {ink}; height:60px; line-height:60px; text-align:center; padding:3px; margin:0 -1px;"));
    css.push_str(
        "      .signature-image { width:auto; height:100%; }
      .logo-image { width:auto; height:60px; padding:3px; margin-left:auto; margin-right:auto; }
",
    );
    rule(&mut css, ".set-anchor", &format!("color:{ink};"));
    css.push_str(
        "      .badge { min-width:22px; text-align:center; padding:3px; margin:2px; border-radius:5px; }
      .spacing-before { margin-top:12px; }
      .ladder-spacing { margin-bottom:10px; }
      .horizontal-spacing { min-width:34px; }
",
    );
    rule(&mut css, ".border", &format!("border:1px solid {ink}; margin-right:-1px; margin-left:-1px;"));
    css.push_str("      .new-page-for-printers { break-before: page; }\n");
    css.push_str(ICONS_CSS);

    format!(
        "<!doctype html>\n<html>\n  <head>\n    <meta charset=\"utf-8\">\n    \
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n    \
         <title>{}</title>\n    <style>\n{css}    </style>\n    \
         <style type=\"text/css\" media=\"print\"> body {{ -webkit-print-color-adjust: exact; }} </style>\n  \
         </head>\n",
        escape_text(title)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::StoredGame;

    fn game(home: &str, guest: &str) -> StoredGame {
        let json = format!(
            r##"{{"id":"g","kind":"INDOOR","homeTeam":{{"name":"A","color":"{home}","liberoColor":"#000000"}},"guestTeam":{{"name":"B","color":"{guest}","liberoColor":"#ffff00"}}}}"##
        );
        StoredGame::from_json(&json).unwrap()
    }

    #[test]
    fn test_text_on_background() {
        let palette = Palette::default();
        assert_eq!(palette.text_on(Color::from_rgb(0, 0, 0)), Color::WHITE);
        assert_eq!(palette.text_on(Color::WHITE), palette.on_background);
    }

    #[test]
    fn test_duplicate_guest_color() {
        let palette = Palette::default();
        let same = game("#1e88e5", "#1e88e5");
        assert_eq!(palette.team_color(&same, TeamType::Home).to_html(), "#1e88e5");
        assert_eq!(palette.team_color(&same, TeamType::Guest), palette.duplicate);

        let different = game("#1e88e5", "#e53935");
        assert_eq!(
            palette.team_color(&different, TeamType::Guest).to_html(),
            "#e53935"
        );
    }

    #[test]
    fn test_head_carries_team_classes() {
        let palette = Palette::default();
        let head = document_head(&game("#000000", "#ffffff"), &palette, "A__B<x>.html");
        assert!(head.starts_with("<!doctype html>"));
        assert!(head.ends_with("</head>\n"));
        assert!(head.contains(".vbr-home-team { color:#ffffff; background-color:#000000; }"));
        assert!(head.contains(".vbr-guest-team { color:#212121; background-color:#ffffff; }"));
        assert!(head.contains(".vbr-guest-libero { color:#212121; background-color:#ffff00; }"));
        assert!(head.contains("<title>A__B&lt;x&gt;.html</title>"));
        assert!(head.contains(".timeout-gray-image"));
    }

    #[test]
    fn test_head_rules_use_ink_color() {
        let palette = Palette::default();
        let head = document_head(&game("#000000", "#ffffff"), &palette, "t");
        assert!(head.contains("      .vbr-captain { text-decoration: underline; }\n"));
        assert!(head.contains(".bordered-cell { border:1px solid #212121; min-width:22px;"));
        assert!(head.contains("      .set-anchor { color:#212121; }\n"));
        assert!(!head.contains("{{"));
    }
}
