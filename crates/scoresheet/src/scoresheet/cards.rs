//! Body cards of the score sheet.
//!
//! Each `*_card` method returns one top-level `div-card`; the smaller
//! helpers return the blocks inside them. Nothing here can fail: missing
//! data renders as empty cells or placeholders.

use super::html::Element;
use super::labels::Labels;
use super::layout::{LineupShape, SetPagination, SheetLayout};
use super::options::{LicenceRole, ScoreSheetOptions, SignatureRole};
use super::RenderSettings;
use crate::game::{Sanction, SanctionCard, StoredGameView, TeamType, COACH, TEAM};

/// Text shown in a player badge.
///
/// Negative numbers and the team sentinel print as `-`, the coach
/// sentinel as the coach abbreviation.
#[must_use]
pub fn player_label(num: i32, labels: &Labels) -> String {
    if num < 0 || num == TEAM {
        "-".to_string()
    } else if num == COACH {
        labels.coach_abbreviation.clone()
    } else {
        num.to_string()
    }
}

/// Score as seen from `team`: its own points first.
#[must_use]
pub fn team_score(team: TeamType, home_points: u32, guest_points: u32) -> String {
    match team {
        TeamType::Home => format!("{home_points}-{guest_points}"),
        TeamType::Guest => format!("{guest_points}-{home_points}"),
    }
}

/// Text next to a sanction: the score, prefixed for the delay family.
#[must_use]
pub fn sanction_badge(team: TeamType, sanction: &Sanction, labels: &Labels) -> String {
    let score = team_score(team, sanction.home_points, sanction.guest_points);
    let label = match sanction.card {
        _ if sanction.card.is_delay() && sanction.improper_request => &labels.improper_request,
        SanctionCard::DelayWarning => &labels.delay_warning,
        SanctionCard::DelayPenalty => &labels.delay_penalty,
        _ => return score,
    };
    if score.is_empty() {
        label.clone()
    } else {
        format!("{label} · {score}")
    }
}

fn sanction_image_class(card: SanctionCard) -> &'static str {
    match card {
        SanctionCard::Yellow => "yellow-card-image",
        SanctionCard::Red => "red-card-image",
        SanctionCard::RedExpulsion => "expulsion-card-image",
        SanctionCard::RedDisqualification => "disqualification-card-image",
        SanctionCard::DelayWarning => "delay-warning-image",
        SanctionCard::DelayPenalty => "delay-penalty-image",
    }
}

fn team_class(team: TeamType) -> String {
    format!("vbr-{team}-team")
}

fn libero_class(team: TeamType) -> String {
    format!("vbr-{team}-libero")
}

/// Whole minutes, rounded up.
pub(crate) fn ceil_minutes(millis: i64) -> i64 {
    millis.div_euclid(60_000) + i64::from(millis.rem_euclid(60_000) != 0)
}

#[derive(Clone, Copy)]
enum Cell {
    Plain,
    Bordered,
    Badge,
}

fn cell(text: impl Into<String>, kind: Cell) -> Element {
    let class = match kind {
        Cell::Plain => "cell",
        Cell::Bordered => "bordered-cell",
        Cell::Badge => "badge",
    };
    Element::new("span").class(class).text(text)
}

fn title(text: &str) -> Element {
    Element::div("div-title").child(cell(text, Cell::Plain))
}

fn spacing() -> Element {
    Element::div("horizontal-spacing")
}

fn empty() -> Element {
    Element::new("div")
}

fn card() -> Element {
    Element::div("div-card")
}

/// Two team columns separated by an empty gutter.
fn home_and_guest(mut column: impl FnMut(TeamType) -> Element) -> Element {
    Element::div("div-grid-h-g")
        .child(column(TeamType::Home))
        .child(empty())
        .child(column(TeamType::Guest))
}

/// Builds the body of one score sheet.
pub(crate) struct CardRenderer<'a, G: StoredGameView + ?Sized> {
    game: &'a G,
    options: &'a ScoreSheetOptions,
    settings: &'a RenderSettings,
    layout: SheetLayout,
}

impl<'a, G: StoredGameView + ?Sized> CardRenderer<'a, G> {
    pub(crate) fn new(
        game: &'a G,
        options: &'a ScoreSheetOptions,
        settings: &'a RenderSettings,
    ) -> Self {
        Self {
            game,
            options,
            settings,
            layout: SheetLayout::from(game.kind()),
        }
    }

    fn labels(&self) -> &'a Labels {
        &self.settings.labels
    }

    /// The `<body>` element with every card in print order.
    pub(crate) fn body(&self) -> Element {
        let mut body = Element::new("body").class("vbr-body");
        body.push(self.header_card());
        body.push(self.teams_card());
        for set_index in 0..self.game.number_of_sets() {
            body.push(self.set_card(set_index));
        }
        body.push(self.header_card().class("new-page-for-printers"));
        body.push(self.remarks_card());
        body.push(self.signatures_card());
        if self.layout.licence_card {
            body.push(self.licences_card());
        }
        body.push(footer(self.labels()));
        body
    }

    fn player(&self, team: TeamType, num: i32, libero: bool) -> Element {
        let mut span = cell(player_label(num, self.labels()), Cell::Badge);
        span.add_class(if libero {
            libero_class(team)
        } else {
            team_class(team)
        });
        if self.game.captain(team) == num {
            span.add_class("vbr-captain");
        }
        span
    }

    fn empty_player(team: TeamType) -> Element {
        cell("-", Cell::Badge).class(team_class(team))
    }

    fn shade_class(&self, team: TeamType, icon: &str) -> String {
        let shade = self.settings.palette.team_color(self.game, team).shade();
        format!("{icon}-{}-image", shade.as_str())
    }

    fn header_card(&self) -> Element {
        let game = self.game;
        let settings = self.settings;
        let mut div = card();

        if let Some(logo) = &self.options.logo {
            div.push(
                Element::div("div-grid-game-header-logo").child(
                    Element::new("img")
                        .class("logo-image")
                        .attr("src", format!("data:image/jpeg;base64,{logo}")),
                ),
            );
        }

        let league = game
            .league()
            .map(|l| format!("{} / {}", l.name, l.division))
            .unwrap_or_default();
        let times = format!(
            "{} \u{2192} {}",
            settings.format_time(game.start_time()),
            settings.format_time(game.end_time())
        );
        let minutes = ceil_minutes(game.end_time().saturating_sub(game.start_time()));
        div.push(Element::div("div-grid-game-header-info").children([
            cell(league, Cell::Bordered),
            cell(settings.format_date(game.start_time()), Cell::Bordered),
            cell(times, Cell::Bordered),
            cell(self.labels().minutes(minutes), Cell::Bordered),
        ]));

        for team in [TeamType::Home, TeamType::Guest] {
            let mut row = Element::div("div-grid-sets-info")
                .child(cell(game.team_name(team), Cell::Bordered).class(team_class(team)))
                .child(cell(game.sets(team).to_string(), Cell::Bordered));
            let mut total = 0u64;
            for set_index in 0..game.number_of_sets() {
                let points = game.points(team, set_index);
                total += u64::from(points);
                row.push(
                    Element::new("a")
                        .class("bordered-cell")
                        .class("set-anchor")
                        .attr("href", format!("#div-set-{}", set_index + 1))
                        .text(points.to_string()),
                );
            }
            div.push(row.child(cell(total.to_string(), Cell::Bordered)));
        }

        div
    }

    fn teams_card(&self) -> Element {
        card()
            .class("spacing-before")
            .child(title(&self.labels().players))
            .child(
                Element::div("div-grid-h-g")
                    .child(self.team_roster(TeamType::Home))
                    .child(spacing())
                    .child(self.team_roster(TeamType::Guest)),
            )
    }

    fn team_roster(&self, team: TeamType) -> Element {
        let mut div = Element::div("div-grid-team");
        for player in self.game.players(team) {
            div.push(self.player(team, player.num, self.game.is_libero(team, player.num)));
            div.push(cell(player.name.as_str(), Cell::Plain));
        }
        div
    }

    fn set_card(&self, set_index: usize) -> Element {
        let mut div = card()
            .class("spacing-before")
            .attr("id", format!("div-set-{}", set_index + 1));
        if SetPagination::from_game(self.game, set_index).starts_new_page(self.layout.pagination) {
            div.add_class("new-page-for-printers");
        }
        div.push(self.set_header(set_index));

        let team_timeouts = self.game.rules().team_timeouts;
        match self.layout.lineup {
            Some(shape) => {
                let mut row = Element::div("div-flex-row")
                    .child(self.lineup(shape, set_index))
                    .child(spacing())
                    .child(spacing())
                    .child(self.substitutions(set_index));
                if team_timeouts {
                    row = row
                        .child(spacing())
                        .child(spacing())
                        .child(self.timeouts(set_index));
                }
                div.push(row);
            }
            None if team_timeouts => {
                div.push(Element::div("div-flex-row").child(self.timeouts(set_index)));
            }
            None => {}
        }

        div.child(self.ladder(set_index))
    }

    fn set_header(&self, set_index: usize) -> Element {
        let game = self.game;
        let settings = self.settings;
        let home = game.points(TeamType::Home, set_index);
        let guest = game.points(TeamType::Guest, set_index);
        let winner = if home > guest {
            TeamType::Home
        } else {
            TeamType::Guest
        };

        let info = Element::div("div-grid-set-header-info").children([
            cell(self.labels().set_title(set_index), Cell::Bordered)
                .class("set-index-cell")
                .class(team_class(winner)),
            cell(home.to_string(), Cell::Bordered),
            cell(guest.to_string(), Cell::Bordered),
        ]);

        let times = format!(
            "{} \u{2192} {}",
            settings.format_time(game.set_start_time(set_index)),
            settings.format_time(game.set_end_time(set_index))
        );
        let minutes = ceil_minutes(game.set_duration(set_index));
        let time = Element::div("div-grid-set-header-time").children([
            cell(times, Cell::Bordered),
            cell(self.labels().minutes(minutes), Cell::Bordered),
        ]);

        let row = Element::div("div-flex-row").children([
            info,
            spacing(),
            spacing(),
            time,
            spacing(),
            spacing(),
        ]);
        if game.rules().sanctions {
            row.child(self.sanctions(set_index))
        } else {
            row
        }
    }

    fn lineup(&self, shape: LineupShape, set_index: usize) -> Element {
        Element::new("div")
            .child(title(&self.labels().starting_lineup).class("spacing-before"))
            .child(home_and_guest(|team| self.team_lineup(shape, team, set_index)))
    }

    fn team_lineup(&self, shape: LineupShape, team: TeamType, set_index: usize) -> Element {
        let confirmed = self.game.is_starting_lineup_confirmed(team, set_index);
        let labels = self.labels();
        let badge = |position| {
            if confirmed {
                let num = self
                    .game
                    .player_at_position_in_starting_lineup(team, position, set_index);
                self.player(team, num, false)
            } else {
                Self::empty_player(team)
            }
        };

        let mut div = Element::div("div-grid-lineup").class("border");
        let front = shape.front_row();
        div = div
            .children(front.iter().map(|p| cell(labels.position(p.number()), Cell::Plain)))
            .children(front.iter().map(|p| badge(*p)));

        let back = shape.back_row();
        if !back.is_empty() {
            div = div
                .children(back.iter().map(|slot| match slot {
                    Some(p) => cell(labels.position(p.number()), Cell::Plain),
                    None => empty(),
                }))
                .children(back.iter().map(|slot| match slot {
                    Some(p) => badge(*p),
                    None => empty(),
                }));
        }
        div
    }

    fn substitutions(&self, set_index: usize) -> Element {
        Element::new("div")
            .child(title(&self.labels().substitutions).class("spacing-before"))
            .child(home_and_guest(|team| {
                Element::div("div-flex-column").children(
                    self.game
                        .substitutions(team, set_index)
                        .iter()
                        .map(|sub| {
                            Element::div("div-grid-substitution").children([
                                self.player(team, sub.player_in, false),
                                Element::div("substitution-image"),
                                self.player(team, sub.player_out, false),
                                cell(team_score(team, sub.home_points, sub.guest_points), Cell::Plain),
                            ])
                        }),
                )
            }))
    }

    fn timeouts(&self, set_index: usize) -> Element {
        Element::new("div")
            .child(title(&self.labels().timeouts).class("spacing-before"))
            .child(home_and_guest(|team| {
                let icon = self.shade_class(team, "timeout");
                Element::div("div-flex-column").children(
                    self.game
                        .called_timeouts(team, set_index)
                        .iter()
                        .map(|timeout| {
                            Element::div("div-grid-timeout").children([
                                self.player(team, -1, false).class(icon.clone()),
                                cell(
                                    team_score(team, timeout.home_points, timeout.guest_points),
                                    Cell::Plain,
                                ),
                            ])
                        }),
                )
            }))
    }

    fn sanctions(&self, set_index: usize) -> Element {
        Element::new("div")
            .child(title(&self.labels().sanctions))
            .child(home_and_guest(|team| {
                Element::div("div-flex-column").children(
                    self.game
                        .sanctions(team, set_index)
                        .iter()
                        .map(|sanction| {
                            let libero =
                                sanction.is_player() && self.game.is_libero(team, sanction.num);
                            Element::div("div-grid-sanction").children([
                                Element::div(sanction_image_class(sanction.card)),
                                self.player(team, sanction.num, libero),
                                cell(sanction_badge(team, sanction, self.labels()), Cell::Plain),
                            ])
                        }),
                )
            }))
    }

    fn ladder(&self, set_index: usize) -> Element {
        let mut row = Element::div("div-flex-row");
        row.push(self.service_item(self.game.first_serving_team(set_index)));

        let (mut home, mut guest) = (0u32, 0u32);
        for &team in self.game.points_ladder(set_index) {
            let score = match team {
                TeamType::Home => {
                    home += 1;
                    home
                }
                TeamType::Guest => {
                    guest += 1;
                    guest
                }
            };
            row.push(ladder_item(
                team,
                cell(score.to_string(), Cell::Badge).class(team_class(team)),
            ));
        }

        Element::new("div")
            .child(title(&self.labels().ladder).class("spacing-before"))
            .child(row)
    }

    fn service_item(&self, team: TeamType) -> Element {
        let serve = cell(" ", Cell::Badge)
            .class(team_class(team))
            .child(Element::new("span").class(self.shade_class(team, "service")));
        ladder_item(team, serve)
    }

    fn remarks_card(&self) -> Element {
        let mut remarks = Element::div("remarks-cell").class("spacing-before");
        for line in self.options.remarks.trim_end_matches('\n').split('\n') {
            remarks = remarks.text(line).child(Element::new("br"));
        }
        card()
            .class("spacing-before")
            .child(title(&self.labels().remarks))
            .child(remarks)
    }

    fn signatures_card(&self) -> Element {
        let labels = self.labels();
        let row = || Element::div("div-grid-1-2-3").class("spacing-before");

        let mut div = card()
            .class("spacing-before")
            .child(title(&labels.signatures))
            .child(row().children([
                self.signature(SignatureRole::Referee1, format!("{} 1", labels.referee), None),
                spacing(),
                self.signature(SignatureRole::Referee2, format!("{} 2", labels.referee), None),
                empty(),
                self.signature(SignatureRole::Scorer, labels.scorer.clone(), None),
            ]))
            .child(row().children([
                self.signature(
                    SignatureRole::captain(TeamType::Home),
                    labels.captain.clone(),
                    Some(TeamType::Home),
                ),
                spacing(),
                self.signature(
                    SignatureRole::captain(TeamType::Guest),
                    labels.captain.clone(),
                    Some(TeamType::Guest),
                ),
            ]));

        if self.layout.coach_signatures {
            div.push(row().children([
                self.signature(
                    SignatureRole::coach(TeamType::Home),
                    labels.coach.clone(),
                    Some(TeamType::Home),
                ),
                spacing(),
                self.signature(
                    SignatureRole::coach(TeamType::Guest),
                    labels.coach.clone(),
                    Some(TeamType::Guest),
                ),
            ]));
        }
        div
    }

    fn signature(&self, role: SignatureRole, heading: String, team: Option<TeamType>) -> Element {
        let signatures = &self.options.signatures;
        let mut title_cell = Element::div("signature-title-cell").text(heading);
        if let Some(team) = team {
            title_cell.add_class(team_class(team));
        }
        let image_cell = match signatures.image(role) {
            Some(image) => Element::div("signature-cell").child(
                Element::new("img")
                    .class("signature-image")
                    .attr("src", format!("data:image/png;base64,{image}")),
            ),
            None => Element::div("signature-cell").text(" "),
        };
        Element::div("div-grid-signature").children([
            title_cell,
            Element::div("signature-name-cell").text(signatures.name(role)),
            image_cell,
        ])
    }

    fn licences_card(&self) -> Element {
        let labels = self.labels();
        let licences = &self.options.licences;

        let officials = Element::new("div")
            .attr(
                "style",
                "display:flex;gap:8px;background:#eee;padding:8px;border:1px solid #ccc;border-radius:6px;margin-top:8px;",
            )
            .children(
                [
                    (&labels.licence_referee_1, LicenceRole::Referee1),
                    (&labels.licence_referee_2, LicenceRole::Referee2),
                    (&labels.licence_scorer, LicenceRole::Scorer),
                ]
                .into_iter()
                .map(|(label, role)| {
                    licence_box(
                        "flex:1;background:#eee;border:1px dashed #bbb;border-radius:6px;min-height:72px;padding:8px;",
                        label,
                        licences.display(role),
                    )
                }),
            );

        let qualified = |label: &str, team: &str| format!("{label} ({team})");
        let staff = Element::new("div")
            .attr(
                "style",
                "margin-top:8px;padding:8px;border:1px solid #ccc;border-radius:6px;background:#f6f6f6;",
            )
            .child(
                Element::new("div")
                    .attr("style", "font-weight:700;margin-bottom:6px;")
                    .text(labels.technical_staff.as_str()),
            )
            .child(
                Element::new("div")
                    .attr("style", "display:flex;gap:8px;flex-wrap:wrap;")
                    .children(
                        [
                            (qualified(&labels.assistant_coach, &labels.home), LicenceRole::HomeAssistantCoach),
                            (qualified(&labels.assistant_coach, &labels.guest), LicenceRole::GuestAssistantCoach),
                            (qualified(&labels.staff, &labels.home), LicenceRole::HomeStaff),
                            (qualified(&labels.staff, &labels.guest), LicenceRole::GuestStaff),
                        ]
                        .into_iter()
                        .map(|(label, role)| {
                            licence_box(
                                "flex:1 1 48%;border:1px dashed #bbb;border-radius:6px;background:#fff;padding:8px;min-height:64px;",
                                &label,
                                licences.display(role),
                            )
                        }),
                    ),
            );

        Element::new("div")
            .attr(
                "style",
                "margin-top:8px;margin-bottom:8px;padding:8px;border:1px solid #ccc;border-radius:6px;background:#fff;",
            )
            .child(
                Element::new("div")
                    .attr("style", "font-weight:700;margin-bottom:6px;")
                    .text(labels.licences.as_str()),
            )
            .child(officials)
            .child(staff)
    }
}

/// One ladder column: the scoring team's badge on its own row, a blank
/// badge on the other.
fn ladder_item(team: TeamType, badge: Element) -> Element {
    let blank = cell(" ", Cell::Badge);
    let column = Element::div("div-flex-column").class("ladder-spacing");
    match team {
        TeamType::Home => column.child(badge).child(blank),
        TeamType::Guest => column.child(blank).child(badge),
    }
}

fn licence_box(style: &str, label: &str, value: &str) -> Element {
    Element::new("div")
        .attr("style", style)
        .child(
            Element::new("div")
                .attr("style", "font-size:11px;color:#555;margin-bottom:4px;font-weight:600;")
                .text(label),
        )
        .child(
            Element::new("div")
                .attr("style", "font-size:13px;color:#222;word-break:break-word;")
                .text(value),
        )
}

fn footer(labels: &Labels) -> Element {
    Element::div("div-footer")
        .text(labels.footer.as_str())
        .child(Element::div("vbr-logo-image"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanction(card: SanctionCard, num: i32, improper_request: bool) -> Sanction {
        Sanction {
            card,
            num,
            set: 0,
            home_points: 10,
            guest_points: 8,
            improper_request,
        }
    }

    #[test]
    fn test_player_label() {
        let labels = Labels::default();
        assert_eq!(player_label(7, &labels), "7");
        assert_eq!(player_label(0, &labels), "0");
        assert_eq!(player_label(-1, &labels), "-");
        assert_eq!(player_label(TEAM, &labels), "-");
        assert_eq!(player_label(COACH, &labels), "C");
    }

    #[test]
    fn test_improper_request_badge() {
        let labels = Labels::default();
        let badge = sanction_badge(
            TeamType::Home,
            &sanction(SanctionCard::DelayWarning, TEAM, true),
            &labels,
        );
        assert_eq!(badge, "IR · 10-8");
    }

    #[test]
    fn test_delay_badges_from_guest_side() {
        let labels = Labels::default();
        assert_eq!(
            sanction_badge(
                TeamType::Guest,
                &sanction(SanctionCard::DelayWarning, TEAM, false),
                &labels
            ),
            "Delay Warning · 8-10"
        );
        assert_eq!(
            sanction_badge(
                TeamType::Home,
                &sanction(SanctionCard::DelayPenalty, TEAM, false),
                &labels
            ),
            "Delay Penalty · 10-8"
        );
    }

    #[test]
    fn test_ordinary_card_badge_is_score_only() {
        let labels = Labels::default();
        let mut yellow = sanction(SanctionCard::Yellow, 4, true);
        yellow.home_points = 5;
        yellow.guest_points = 3;
        assert_eq!(sanction_badge(TeamType::Home, &yellow, &labels), "5-3");
        assert_eq!(sanction_badge(TeamType::Guest, &yellow, &labels), "3-5");
    }

    #[test]
    fn test_ceil_minutes() {
        assert_eq!(ceil_minutes(0), 0);
        assert_eq!(ceil_minutes(1), 1);
        assert_eq!(ceil_minutes(60_000), 1);
        assert_eq!(ceil_minutes(60_001), 2);
        assert_eq!(ceil_minutes(1_500_000), 25);
    }

    #[test]
    fn test_ladder_item_rows() {
        let html = ladder_item(TeamType::Guest, cell("3", Cell::Badge)).to_html();
        assert_eq!(
            html,
            r#"<div class="div-flex-column ladder-spacing"><span class="badge"> </span><span class="badge">3</span></div>"#
        );
    }

    #[test]
    fn test_sanction_image_classes() {
        assert_eq!(sanction_image_class(SanctionCard::RedExpulsion), "expulsion-card-image");
        assert_eq!(sanction_image_class(SanctionCard::DelayPenalty), "delay-penalty-image");
    }
}
