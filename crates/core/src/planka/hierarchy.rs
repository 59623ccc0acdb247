//! Project → Board → List → Card tree and the resource locator
//!
//! The tree is assembled from side-loaded API responses in the order the
//! server returned them. Lookups walk that order and return the first match;
//! nothing here sorts, deduplicates or reports id collisions.

use serde::Serialize;

use super::types::{
    PlankaBoard, PlankaBoardResponse, PlankaCard, PlankaList, PlankaProjectsResponse,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub created_at: Option<String>,
    pub boards: Vec<Board>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Board {
    pub id: String,
    pub name: String,
    pub project_id: Option<String>,
    pub lists: Vec<List>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct List {
    pub id: String,
    pub name: Option<String>,
    pub position: Option<f64>,
    pub board_id: Option<String>,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub card_type: Option<String>,
    pub due_date: Option<String>,
    pub is_due_completed: bool,
    pub position: Option<f64>,
    pub list_id: Option<String>,
    pub board_id: Option<String>,
    pub comments_total: Option<u64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<PlankaCard> for Card {
    fn from(card: PlankaCard) -> Self {
        Card {
            id: card.id,
            name: card.name,
            description: card.description,
            card_type: card.card_type,
            due_date: card.due_date,
            is_due_completed: card.is_due_completed.unwrap_or(false),
            position: card.position,
            list_id: card.list_id,
            board_id: card.board_id,
            comments_total: card.comments_total,
            created_at: card.created_at,
            updated_at: card.updated_at,
        }
    }
}

impl List {
    /// Name for display; archive and trash lists fall back to the list id
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Positions of the cards in this list, ascending, leaving out `excluding`
    pub fn sibling_positions(&self, excluding: Option<&str>) -> Vec<f64> {
        let mut positions: Vec<f64> = self
            .cards
            .iter()
            .filter(|card| Some(card.id.as_str()) != excluding)
            .filter_map(|card| card.position)
            .collect();
        positions.sort_by(|a, b| a.total_cmp(b));
        positions
    }
}

fn board_from_summary(board: PlankaBoard) -> Board {
    Board {
        id: board.id,
        name: board.name,
        project_id: board.project_id,
        lists: Vec::new(),
    }
}

fn list_from_wire(list: PlankaList) -> List {
    List {
        id: list.id,
        name: list.name,
        position: list.position,
        board_id: list.board_id,
        cards: Vec::new(),
    }
}

/// Build a board with its lists and cards from a `GET /api/boards/{id}` response
///
/// Cards are attached to the list named by their `listId`; cards pointing at a
/// list that is not part of the response are dropped.
pub fn assemble_board(response: PlankaBoardResponse) -> Board {
    let mut board = board_from_summary(response.item);
    board.lists = response
        .included
        .lists
        .into_iter()
        .map(list_from_wire)
        .collect();

    for card in response.included.cards {
        let target = card
            .list_id
            .as_deref()
            .and_then(|list_id| board.lists.iter_mut().find(|list| list.id == list_id));
        if let Some(list) = target {
            list.cards.push(Card::from(card));
        }
    }

    for list in &mut board.lists {
        if list.board_id.is_none() {
            list.board_id = Some(board.id.clone());
        }
    }

    board
}

/// Build the project tree from the projects response and any fetched board details
///
/// Boards without a matching detail response keep an empty list collection, which
/// is enough for commands that only need projects and boards.
pub fn assemble_hierarchy(
    projects: PlankaProjectsResponse,
    board_details: Vec<PlankaBoardResponse>,
) -> Vec<Project> {
    let mut details: Vec<Option<PlankaBoardResponse>> =
        board_details.into_iter().map(Some).collect();
    let boards = projects.included.boards;

    projects
        .items
        .into_iter()
        .map(|project| {
            let project_boards = boards
                .iter()
                .filter(|board| board.project_id.as_deref() == Some(project.id.as_str()))
                .map(|board| {
                    let detail = details
                        .iter_mut()
                        .find(|d| d.as_ref().is_some_and(|d| d.item.id == board.id))
                        .and_then(Option::take);
                    match detail {
                        Some(detail) => assemble_board(detail),
                        None => board_from_summary(board.clone()),
                    }
                })
                .collect();

            Project {
                id: project.id,
                name: project.name,
                created_at: project.created_at,
                boards: project_boards,
            }
        })
        .collect()
}

/// Find a project by id
pub fn find_project<'a>(projects: &'a [Project], project_id: &str) -> Option<&'a Project> {
    projects.iter().find(|project| project.id == project_id)
}

/// Find a board by id across every project
pub fn find_board<'a>(projects: &'a [Project], board_id: &str) -> Option<&'a Board> {
    projects
        .iter()
        .flat_map(|project| project.boards.iter())
        .find(|board| board.id == board_id)
}

/// Find a list by id across every project and board
pub fn find_list<'a>(projects: &'a [Project], list_id: &str) -> Option<&'a List> {
    find_list_with_parent(projects, list_id).map(|(list, _)| list)
}

/// Find a list by id together with the board that owns it
pub fn find_list_with_parent<'a>(
    projects: &'a [Project],
    list_id: &str,
) -> Option<(&'a List, &'a Board)> {
    for project in projects {
        for board in &project.boards {
            for list in &board.lists {
                if list.id == list_id {
                    return Some((list, board));
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planka::types::{PlankaBoardIncluded, PlankaProject, PlankaProjectsIncluded};

    fn wire_board(id: &str, project_id: &str, name: &str) -> PlankaBoard {
        PlankaBoard {
            id: id.to_string(),
            project_id: Some(project_id.to_string()),
            name: name.to_string(),
            position: None,
            created_at: None,
        }
    }

    fn wire_list(id: &str, board_id: &str, name: &str, position: f64) -> PlankaList {
        PlankaList {
            id: id.to_string(),
            board_id: Some(board_id.to_string()),
            list_type: Some("active".to_string()),
            name: Some(name.to_string()),
            position: Some(position),
        }
    }

    fn wire_card(id: &str, list_id: &str, position: f64) -> PlankaCard {
        PlankaCard {
            id: id.to_string(),
            board_id: None,
            list_id: Some(list_id.to_string()),
            card_type: Some("project".to_string()),
            position: Some(position),
            name: format!("Card {id}"),
            description: None,
            due_date: None,
            is_due_completed: None,
            comments_total: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn board_detail(
        board: PlankaBoard,
        lists: Vec<PlankaList>,
        cards: Vec<PlankaCard>,
    ) -> PlankaBoardResponse {
        PlankaBoardResponse {
            item: board,
            included: PlankaBoardIncluded { lists, cards },
        }
    }

    // Two projects: p1 has boards b1 (lists l1, l2) and b2 (list l3); p2 has b3 (list l4)
    fn fixture() -> Vec<Project> {
        let projects = PlankaProjectsResponse {
            items: vec![
                PlankaProject {
                    id: "p1".to_string(),
                    name: "Alpha".to_string(),
                    created_at: None,
                },
                PlankaProject {
                    id: "p2".to_string(),
                    name: "Beta".to_string(),
                    created_at: None,
                },
            ],
            included: PlankaProjectsIncluded {
                boards: vec![
                    wire_board("b1", "p1", "Roadmap"),
                    wire_board("b3", "p2", "Ops"),
                    wire_board("b2", "p1", "Bugs"),
                ],
            },
        };

        let details = vec![
            board_detail(
                wire_board("b3", "p2", "Ops"),
                vec![wire_list("l4", "b3", "Inbox", 65536.0)],
                vec![],
            ),
            board_detail(
                wire_board("b1", "p1", "Roadmap"),
                vec![
                    wire_list("l1", "b1", "Todo", 65536.0),
                    wire_list("l2", "b1", "Done", 131072.0),
                ],
                vec![
                    wire_card("c2", "l1", 131072.0),
                    wire_card("c1", "l1", 65536.0),
                    wire_card("c3", "l2", 65536.0),
                    wire_card("orphan", "missing", 1.0),
                ],
            ),
            board_detail(
                wire_board("b2", "p1", "Bugs"),
                vec![wire_list("l3", "b2", "Triage", 65536.0)],
                vec![],
            ),
        ];

        assemble_hierarchy(projects, details)
    }

    #[test]
    fn test_assemble_hierarchy_keeps_server_order() {
        // Act
        let projects = fixture();

        // Assert: boards grouped per project in the order the server sent them
        assert_eq!(projects.len(), 2);
        let p1_boards: Vec<&str> = projects[0].boards.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(p1_boards, vec!["b1", "b2"]);
        assert_eq!(projects[1].boards[0].id, "b3");

        // Cards are attached in response order, not sorted by position
        let todo = &projects[0].boards[0].lists[0];
        let card_ids: Vec<&str> = todo.cards.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(card_ids, vec!["c2", "c1"]);
    }

    #[test]
    fn test_assemble_hierarchy_drops_cards_of_unknown_lists() {
        let projects = fixture();

        let total_cards: usize = projects[0].boards[0]
            .lists
            .iter()
            .map(|list| list.cards.len())
            .sum();
        assert_eq!(total_cards, 3);
    }

    #[test]
    fn test_assemble_hierarchy_without_details_has_empty_lists() {
        let projects = PlankaProjectsResponse {
            items: vec![PlankaProject {
                id: "p1".to_string(),
                name: "Alpha".to_string(),
                created_at: Some("2024-01-01T00:00:00.000Z".to_string()),
            }],
            included: PlankaProjectsIncluded {
                boards: vec![wire_board("b1", "p1", "Roadmap")],
            },
        };

        let tree = assemble_hierarchy(projects, vec![]);

        assert_eq!(tree[0].boards.len(), 1);
        assert!(tree[0].boards[0].lists.is_empty());
    }

    #[test]
    fn test_assemble_board_fills_missing_board_id_on_lists() {
        let mut list = wire_list("l1", "b1", "Todo", 1.0);
        list.board_id = None;

        let board = assemble_board(board_detail(wire_board("b1", "p1", "Roadmap"), vec![list], vec![]));

        assert_eq!(board.lists[0].board_id.as_deref(), Some("b1"));
    }

    #[test]
    fn test_find_list_across_projects() {
        let projects = fixture();

        let list = find_list(&projects, "l4").unwrap();

        assert_eq!(list.display_name(), "Inbox");
    }

    #[test]
    fn test_find_list_with_parent_returns_owning_board() {
        let projects = fixture();

        let (list, board) = find_list_with_parent(&projects, "l3").unwrap();

        assert_eq!(list.id, "l3");
        assert_eq!(board.id, "b2");
        assert_eq!(board.name, "Bugs");
    }

    #[test]
    fn test_find_list_not_found() {
        let projects = fixture();

        assert!(find_list(&projects, "nope").is_none());
        assert!(find_list_with_parent(&projects, "nope").is_none());
    }

    #[test]
    fn test_empty_hierarchy_yields_not_found() {
        let projects: Vec<Project> = vec![];

        assert!(find_list(&projects, "l1").is_none());
        assert!(find_list_with_parent(&projects, "l1").is_none());
        assert!(find_board(&projects, "b1").is_none());
        assert!(find_project(&projects, "p1").is_none());
    }

    #[test]
    fn test_find_list_returns_first_match_on_duplicate_ids() {
        let mut projects = fixture();
        // Inconsistent server: the same list id under two boards
        projects[1].boards[0].lists[0].id = "l1".to_string();

        let (_, board) = find_list_with_parent(&projects, "l1").unwrap();

        assert_eq!(board.id, "b1");
    }

    #[test]
    fn test_find_board_and_project() {
        let projects = fixture();

        assert_eq!(find_board(&projects, "b2").unwrap().name, "Bugs");
        assert_eq!(find_project(&projects, "p2").unwrap().name, "Beta");
    }

    #[test]
    fn test_sibling_positions_sorted_and_excluding_card() {
        let projects = fixture();
        let todo = find_list(&projects, "l1").unwrap();

        assert_eq!(todo.sibling_positions(None), vec![65536.0, 131072.0]);
        assert_eq!(todo.sibling_positions(Some("c1")), vec![131072.0]);
    }
}
