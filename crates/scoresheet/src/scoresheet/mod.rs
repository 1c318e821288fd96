//! Score sheet rendering.
//!
//! [`render`] turns a [`StoredGameView`] plus caller-supplied
//! [`ScoreSheetOptions`] into a self-contained HTML document. Rendering is a
//! pure function of its inputs: it performs no I/O, never reads the clock,
//! and produces byte-identical output for identical inputs.
//!
//! [`ScoreSheetBuilder`] wraps the same function behind chaining setters.

mod cards;
mod html;
mod labels;
mod layout;
mod options;
mod style;

use std::fmt;
use std::fmt::Write as _;
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use regex::Regex;
use tracing::debug;

use crate::game::{StoredGameView, TeamType};

pub use cards::{player_label, sanction_badge, team_score};
pub use html::{escape_attr, escape_text, Element, Node};
pub use labels::Labels;
pub use layout::{LineupShape, PaginationRule, SetPagination, SheetLayout};
pub use options::{
    LicenceRole, Licences, ScoreSheetOptions, Signature, SignatureRole, Signatures,
    LICENCE_PLACEHOLDER,
};
pub use style::{document_head, Palette};

/// Default full date pattern, e.g. `Tuesday, 14 November 2023`.
pub const DEFAULT_DATE_FORMAT: &str = "%A, %-d %B %Y";

/// Default short time pattern.
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M";

/// Date pattern used in file names.
const FILENAME_DATE_FORMAT: &str = "%d_%m_%Y";

/// Characters that are unsafe in file names on at least one platform.
static UNSAFE_FILENAME_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\s|?*<:>+\[\]/']").expect("Invalid filename pattern")
});

/// A rendered score sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSheet {
    /// Suggested file name, already sanitized.
    pub filename: String,
    /// Complete HTML document.
    pub content: String,
}

impl ScoreSheet {
    /// BLAKE3 digest of the content, hex encoded.
    #[must_use]
    pub fn digest(&self) -> String {
        blake3::hash(self.content.as_bytes()).to_hex().to_string()
    }
}

/// Presentation settings that come from configuration rather than from the
/// match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings {
    /// Printed strings.
    pub labels: Labels,
    /// Non-team colors.
    pub palette: Palette,
    /// Offset used for every printed date and time.
    pub utc_offset: FixedOffset,
    /// chrono pattern for the full date.
    pub date_format: String,
    /// chrono pattern for start and end times.
    pub time_format: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            labels: Labels::default(),
            palette: Palette::default(),
            utc_offset: Utc.fix(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

impl RenderSettings {
    /// Full date of an epoch-millisecond timestamp.
    #[must_use]
    pub fn format_date(&self, millis: i64) -> String {
        self.format_millis(millis, &self.date_format)
    }

    /// Short time of an epoch-millisecond timestamp.
    #[must_use]
    pub fn format_time(&self, millis: i64) -> String {
        self.format_millis(millis, &self.time_format)
    }

    /// Format a timestamp; an unusable pattern yields an empty string.
    fn format_millis(&self, millis: i64, pattern: &str) -> String {
        let local = DateTime::from_timestamp_millis(millis)
            .unwrap_or_default()
            .with_timezone(&self.utc_offset);
        let mut out = String::new();
        if write!(out, "{}", local.format(pattern)).is_err() {
            out.clear();
        }
        out
    }
}

/// `{home}__{guest}__{dd_MM_yyyy}.html`, with unsafe characters replaced
/// by `_`.
#[must_use]
pub fn score_sheet_filename<G: StoredGameView + ?Sized>(
    game: &G,
    settings: &RenderSettings,
) -> String {
    let date = settings.format_millis(game.scheduled_at(), FILENAME_DATE_FORMAT);
    let filename = format!(
        "{}__{}__{date}.html",
        game.team_name(TeamType::Home),
        game.team_name(TeamType::Guest)
    );
    UNSAFE_FILENAME_CHARS.replace_all(&filename, "_").into_owned()
}

/// Render a complete score sheet.
#[must_use]
pub fn render<G: StoredGameView + ?Sized>(
    game: &G,
    options: &ScoreSheetOptions,
    settings: &RenderSettings,
) -> ScoreSheet {
    let filename = score_sheet_filename(game, settings);

    let mut content = document_head(game, &settings.palette, &filename);
    content.push_str("  ");
    cards::CardRenderer::new(game, options, settings)
        .body()
        .render_into(&mut content);
    content.push_str("\n</html>\n");

    debug!(
        game_id = game.id(),
        kind = %game.kind(),
        sets = game.number_of_sets(),
        bytes = content.len(),
        "Rendered score sheet {}",
        filename
    );

    ScoreSheet { filename, content }
}

/// Chaining front end over [`render`].
///
/// The file name is computed once at construction and never changes.
pub struct ScoreSheetBuilder<'a, G: StoredGameView + ?Sized> {
    game: &'a G,
    settings: RenderSettings,
    options: ScoreSheetOptions,
    filename: String,
}

impl<'a, G: StoredGameView + ?Sized> ScoreSheetBuilder<'a, G> {
    /// Start a sheet for `game` with default settings.
    #[must_use]
    pub fn new(game: &'a G) -> Self {
        Self::with_settings(game, RenderSettings::default())
    }

    /// Start a sheet for `game` with explicit settings.
    #[must_use]
    pub fn with_settings(game: &'a G, settings: RenderSettings) -> Self {
        let filename = score_sheet_filename(game, &settings);
        Self {
            game,
            settings,
            options: ScoreSheetOptions::default(),
            filename,
        }
    }

    /// The sanitized file name.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Header logo as base64 JPEG; `None` or empty removes it.
    #[must_use]
    pub fn set_logo(mut self, logo: Option<String>) -> Self {
        self.options = self.options.with_logo(logo);
        self
    }

    /// Free-text remarks.
    #[must_use]
    pub fn set_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.options = self.options.with_remarks(remarks);
        self
    }

    /// Signatory name and optional base64 PNG signature.
    #[must_use]
    pub fn set_signature(
        mut self,
        role: SignatureRole,
        name: impl Into<String>,
        image: Option<String>,
    ) -> Self {
        self.options = self.options.with_signature(role, name, image);
        self
    }

    /// Licence number of an official or staff member.
    #[must_use]
    pub fn set_licence(mut self, role: LicenceRole, value: impl Into<String>) -> Self {
        self.options = self.options.with_licence(role, value);
        self
    }

    /// Replace every option at once.
    #[must_use]
    pub fn options(mut self, options: ScoreSheetOptions) -> Self {
        self.options = options;
        self
    }

    /// Render the sheet. Can be called repeatedly.
    #[must_use]
    pub fn build(&self) -> ScoreSheet {
        render(self.game, &self.options, &self.settings)
    }
}

impl<G: StoredGameView + ?Sized> fmt::Debug for ScoreSheetBuilder<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoreSheetBuilder")
            .field("game", &self.game.id())
            .field("filename", &self.filename)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameKind, StoredGame};

    /// Two-set match, 14 Nov 2023 22:13 UTC.
    const GAME: &str = r##"{
        "id": "m-42",
        "kind": "INDOOR",
        "league": { "name": "City League", "division": "Women A" },
        "scheduledAt": 1700000000000,
        "startTime": 1700000000000,
        "endTime": 1700003630000,
        "homeTeam": {
            "name": "Red Lions", "color": "#c62828", "liberoColor": "#ffeb3b",
            "captain": 7, "sets": 2,
            "players": [
                { "num": 7, "name": "Ana" }, { "num": 9, "name": "Bea" },
                { "num": 12, "name": "Cris" }
            ],
            "liberos": [12]
        },
        "guestTeam": {
            "name": "Blue <Sharks>", "color": "#1565c0", "liberoColor": "#ffffff",
            "captain": 3, "sets": 0,
            "players": [{ "num": 3, "name": "Dani" }, { "num": 4, "name": "Eva" }]
        },
        "sets": [
            {
                "homePoints": 25, "guestPoints": 20,
                "startTime": 1700000000000, "endTime": 1700001500000, "duration": 1500000,
                "firstServingTeam": "GUEST",
                "ladder": ["GUEST", "HOME", "HOME"],
                "home": {
                    "startingLineup": [1, 2, 3, 4, 5, 7],
                    "substitutions": [{ "playerIn": 9, "playerOut": 3, "homePoints": 10, "guestPoints": 8 }],
                    "timeouts": [{ "homePoints": 5, "guestPoints": 9 }],
                    "sanctions": [
                        { "card": "DELAY_WARNING", "num": 200, "set": 0, "homePoints": 10, "guestPoints": 8, "ir": true },
                        { "card": "YELLOW", "num": 100, "set": 0, "homePoints": 11, "guestPoints": 8 }
                    ]
                },
                "guest": {
                    "sanctions": [{ "card": "RED", "num": 4, "set": 0, "homePoints": 3, "guestPoints": 5 }]
                }
            },
            { "homePoints": 25, "guestPoints": 23, "duration": 1560001 }
        ]
    }"##;

    fn game() -> StoredGame {
        StoredGame::from_json(GAME).unwrap()
    }

    fn game_of_kind(kind: GameKind) -> StoredGame {
        let mut game = game();
        game.kind = kind;
        game
    }

    #[test]
    fn test_filename_format_and_sanitizing() {
        let game = game();
        let sheet = ScoreSheetBuilder::new(&game);
        assert_eq!(sheet.filename(), "Red_Lions__Blue__Sharks___14_11_2023.html");
    }

    #[test]
    fn test_filename_replaces_every_unsafe_char() {
        let mut game = game();
        game.home_team.name = "a b\tc|d?e*f<g:h>i+j[k]l/m'n".to_string();
        game.guest_team.name = "ok".to_string();
        let filename = score_sheet_filename(&game, &RenderSettings::default());
        assert_eq!(filename, "a_b_c_d_e_f_g_h_i_j_k_l_m_n__ok__14_11_2023.html");
    }

    #[test]
    fn test_filename_uses_configured_offset() {
        let settings = RenderSettings {
            utc_offset: FixedOffset::east_opt(2 * 3600).unwrap(),
            ..RenderSettings::default()
        };
        let filename = score_sheet_filename(&game(), &settings);
        assert!(filename.ends_with("__15_11_2023.html"));
    }

    #[test]
    fn test_build_is_idempotent_for_every_kind() {
        for kind in [
            GameKind::Indoor,
            GameKind::Indoor4x4,
            GameKind::Beach,
            GameKind::Snow,
        ] {
            let game = game_of_kind(kind);
            let builder = ScoreSheetBuilder::new(&game)
                .set_logo(Some("LOGO".to_string()))
                .set_remarks("first\nsecond")
                .set_signature(SignatureRole::Referee1, "Ref One", Some("SIG".to_string()))
                .set_licence(LicenceRole::Scorer, "SC-9");
            let first = builder.build();
            let second = builder.build();
            assert_eq!(first, second, "{kind}");
            assert_eq!(first.digest(), second.digest());
            assert_eq!(first.filename, builder.filename());
        }
    }

    #[test]
    fn test_document_skeleton() {
        let sheet = render(&game(), &ScoreSheetOptions::default(), &RenderSettings::default());
        assert!(sheet.content.starts_with("<!doctype html>\n<html>\n  <head>"));
        assert!(sheet.content.contains("<body class=\"vbr-body\">"));
        assert!(sheet.content.ends_with("</body>\n</html>\n"));
        assert!(sheet.content.contains("<title>Red_Lions__Blue__Sharks___14_11_2023.html</title>"));
    }

    #[test]
    fn test_header_and_anchors() {
        let sheet = render(&game(), &ScoreSheetOptions::default(), &RenderSettings::default());
        let html = &sheet.content;
        assert!(html.contains("City League / Women A"));
        assert!(html.contains("Tuesday, 14 November 2023"));
        assert!(html.contains("22:13 \u{2192} 23:13"));
        // 3630 s rounds up to 61 minutes
        assert!(html.contains("61 min"));
        assert!(html.contains(r##"<a class="bordered-cell set-anchor" href="#div-set-2">23</a>"##));
        assert!(html.contains("Blue &lt;Sharks&gt;"));
        assert!(html.contains(r#"<span class="bordered-cell">50</span>"#));
    }

    #[test]
    fn test_set_cards_and_pagination() {
        let sheet = render(&game(), &ScoreSheetOptions::default(), &RenderSettings::default());
        let html = &sheet.content;
        assert!(html.contains(r#"<div class="div-card spacing-before" id="div-set-1">"#));
        assert!(html.contains(
            r#"<div class="div-card spacing-before new-page-for-printers" id="div-set-2">"#
        ));
        assert!(html.contains("27 min"));
        assert!(html.contains(r#"class="bordered-cell set-index-cell vbr-home-team">Set 1<"#));
    }

    #[test]
    fn test_roster_and_lineup_badges() {
        let sheet = render(&game(), &ScoreSheetOptions::default(), &RenderSettings::default());
        let html = &sheet.content;
        assert!(html.contains(r#"<span class="badge vbr-home-team vbr-captain">7</span>"#));
        assert!(html.contains(r#"<span class="badge vbr-home-libero">12</span>"#));
        // Guest lineup is not confirmed
        assert!(html.contains(r#"<span class="badge vbr-guest-team">-</span>"#));
    }

    #[test]
    fn test_sanctions_and_events() {
        let sheet = render(&game(), &ScoreSheetOptions::default(), &RenderSettings::default());
        let html = &sheet.content;
        assert!(html.contains("IR · 10-8"));
        assert!(html.contains(r#"<span class="badge vbr-home-team">C</span>"#));
        assert!(html.contains(r#"<div class="red-card-image"></div>"#));
        assert!(html.contains("5-3"));
        assert!(html.contains(r#"<div class="substitution-image"></div>"#));
        assert!(html.contains("timeout-white-image"));
        assert!(html.contains("service-white-image"));
    }

    #[test]
    fn test_rules_hide_sanctions_and_timeouts() {
        let mut game = game();
        game.rules.sanctions = false;
        game.rules.team_timeouts = false;
        let sheet = render(&game, &ScoreSheetOptions::default(), &RenderSettings::default());
        assert!(!sheet.content.contains(r#"class="div-grid-sanction""#));
        assert!(!sheet.content.contains(">Timeouts<"));
        assert!(!sheet.content.contains(r#"class="div-grid-timeout""#));
    }

    #[test]
    fn test_lineup_shapes_per_kind() {
        let settings = RenderSettings::default();
        let options = ScoreSheetOptions::default();

        let indoor = render(&game_of_kind(GameKind::Indoor), &options, &settings).content;
        assert!(indoor.contains(">VI<"));

        let four = render(&game_of_kind(GameKind::Indoor4x4), &options, &settings).content;
        assert!(!four.contains(">VI<"));
        assert!(four.contains(r#"<div></div><span class="cell">I</span><div></div>"#));

        let snow = render(&game_of_kind(GameKind::Snow), &options, &settings).content;
        assert!(snow.contains(
            r#"<span class="cell">I</span><span class="cell">II</span><span class="cell">III</span>"#
        ));

        let beach = render(&game_of_kind(GameKind::Beach), &options, &settings).content;
        assert!(!beach.contains(r#"class="div-grid-lineup"#));
        assert!(!beach.contains(r#"class="div-grid-substitution""#));
        assert!(beach.contains(r#"class="div-grid-timeout""#));
    }

    #[test]
    fn test_beach_two_sets_has_no_set_page_break() {
        let sheet = render(
            &game_of_kind(GameKind::Beach),
            &ScoreSheetOptions::default(),
            &RenderSettings::default(),
        );
        assert!(sheet.content.contains(r#"<div class="div-card spacing-before" id="div-set-2">"#));
    }

    #[test]
    fn test_signatures_and_coaches() {
        let options = ScoreSheetOptions::default()
            .with_signature(SignatureRole::Referee1, "Ref One", Some("SIG".to_string()))
            .with_signature(SignatureRole::HomeCoach, "Coach H", None);
        let indoor = render(&game(), &options, &RenderSettings::default()).content;
        assert!(indoor.contains(r#"<img class="signature-image" src="data:image/png;base64,SIG">"#));
        assert!(indoor.contains(r#"<div class="signature-name-cell">Ref One</div>"#));
        assert!(indoor.contains(r#"<div class="signature-cell"> </div>"#));
        assert!(indoor.contains("Coach H"));
        assert!(indoor.contains("Referee 2"));

        let snow = render(&game_of_kind(GameKind::Snow), &options, &RenderSettings::default()).content;
        assert!(!snow.contains("Coach H"));
        assert!(snow.contains(r#"<div class="signature-title-cell vbr-guest-team">Captain</div>"#));
    }

    #[test]
    fn test_licence_card_placeholders() {
        let options = ScoreSheetOptions::default().with_licence(LicenceRole::Referee1, "R-100");
        let indoor = render(&game(), &options, &RenderSettings::default()).content;
        assert!(indoor.contains("R-100"));
        assert!(indoor.contains(LICENCE_PLACEHOLDER));
        assert!(indoor.contains("Assistant coach (Home)"));
        assert!(indoor.contains("Staff (Guest)"));

        let four = render(&game_of_kind(GameKind::Indoor4x4), &options, &RenderSettings::default()).content;
        assert!(four.contains("R-100"));

        let beach = render(&game_of_kind(GameKind::Beach), &options, &RenderSettings::default()).content;
        assert!(!beach.contains("R-100"));
        assert!(!beach.contains("Technical staff"));
    }

    #[test]
    fn test_logo_remarks_and_footer() {
        let options = ScoreSheetOptions::default()
            .with_logo(Some("JPEG".to_string()))
            .with_remarks("line <1>\nline 2");
        let html = render(&game(), &options, &RenderSettings::default()).content;
        assert_eq!(html.matches("data:image/jpeg;base64,JPEG").count(), 2);
        assert!(html.contains("line &lt;1&gt;<br>line 2<br>"));
        assert!(html.contains("Powered by Volleyball Referee<div class=\"vbr-logo-image\"></div>"));
        assert!(html.contains(r#"<div class="div-card new-page-for-printers">"#));
    }

    #[test]
    fn test_bad_time_format_degrades_to_empty() {
        let settings = RenderSettings {
            time_format: "%Q".to_string(),
            ..RenderSettings::default()
        };
        assert_eq!(settings.format_time(0), "");
        let sheet = render(&game(), &ScoreSheetOptions::default(), &settings);
        assert!(sheet.content.contains(" \u{2192} "));
    }

    #[test]
    fn test_duplicate_colors_use_palette() {
        let mut game = game();
        game.guest_team.color = game.home_team.color;
        let settings = RenderSettings::default();
        let html = render(&game, &ScoreSheetOptions::default(), &settings).content;
        assert!(html.contains(&format!(
            ".vbr-guest-team {{ color:{}; background-color:{}; }}",
            settings.palette.on_background, settings.palette.duplicate
        )));
    }

    #[test]
    fn test_extreme_snapshot_values_still_render() {
        let mut game = game();
        game.sets[0].home_points = u32::MAX;
        game.sets[0].guest_points = 1;
        game.sets[1].home_points = u32::MAX;
        game.start_time = i64::MIN;
        game.end_time = i64::MAX;

        let html = render(&game, &ScoreSheetOptions::default(), &RenderSettings::default()).content;
        assert!(html.contains(">8589934590</span>"));
        assert!(html.contains(r#"id="div-set-1""#));
    }

    #[test]
    fn test_trailing_newline_in_remarks_adds_no_blank_line() {
        let options = ScoreSheetOptions::default().with_remarks("late start\n");
        let html = render(&game(), &options, &RenderSettings::default()).content;
        assert!(html.contains(r#"spacing-before">late start<br></div>"#));
    }

    #[test]
    fn test_builder_debug_hides_game_body() {
        let game = game();
        let debug = format!("{:?}", ScoreSheetBuilder::new(&game));
        assert!(debug.contains("m-42"));
        assert!(!debug.contains("Red Lions"));
    }
}
