// tests/profile_parse_test.rs

use vhu_portal_core::parsers::profile::parse_profile_from_html;
use vhu_portal_core::{FIELD_UNKNOWN, PortalError};

fn profile_table(rows: &str) -> String {
    format!(r#"<div class="MuiTableContainer-root"><table><tbody>{rows}</tbody></table></div>"#)
}

fn full_profile_page() -> String {
    let personal = profile_table(
        r#"<tr><td>Họ và tên</td><td>Trần Thị Bình</td></tr>
           <tr><td>Ngày sinh</td><td>02/09/2004</td></tr>"#,
    );
    let contact = profile_table(
        r#"<tr><td>Điện thoại</td><td>0901234567</td></tr>
           <tr><td>Địa chỉ</td><td></td></tr>"#,
    );
    let course = profile_table(r#"<tr><td>Ngành</td><td>Công nghệ thông tin</td></tr>"#);
    let emergency = profile_table(r#"<tr><td>Người liên hệ</td><td>Trần Văn Cường</td></tr>"#);
    format!("<html><body>{personal}{contact}{course}{emergency}</body></html>")
}

#[test]
fn four_tables_map_to_four_sections_in_document_order() {
    let profile = parse_profile_from_html(&full_profile_page()).unwrap();

    assert_eq!(profile.personal.len(), 2);
    assert_eq!(profile.personal[0].label, "Họ và tên");
    assert_eq!(profile.personal[0].value, "Trần Thị Bình");
    assert_eq!(profile.contact[0].value, "0901234567");
    assert_eq!(profile.course[0].value, "Công nghệ thông tin");
    assert_eq!(profile.emergency_contact[0].label, "Người liên hệ");
}

#[test]
fn empty_value_cells_fall_back_to_the_sentinel() {
    let profile = parse_profile_from_html(&full_profile_page()).unwrap();
    assert_eq!(profile.contact[1].label, "Địa chỉ");
    assert_eq!(profile.contact[1].value, FIELD_UNKNOWN);
}

#[test]
fn missing_trailing_tables_leave_those_sections_empty() {
    let html = format!(
        "<html><body>{}</body></html>",
        profile_table(r#"<tr><td>Họ và tên</td><td>Trần Thị Bình</td></tr>"#)
    );

    let profile = parse_profile_from_html(&html).unwrap();

    assert_eq!(profile.personal.len(), 1);
    assert!(profile.contact.is_empty());
    assert!(profile.course.is_empty());
    assert!(profile.emergency_contact.is_empty());
}

#[test]
fn page_without_any_table_is_a_parse_error() {
    let result = parse_profile_from_html("<html><body><p>đang tải</p></body></html>");
    assert!(matches!(result, Err(PortalError::Parsing(_))));
}
