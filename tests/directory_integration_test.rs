use httpmock::prelude::*;
use ports_index::{PortDirectory, PortsError, UneceDirectory};

fn directory_page(rows: &[(&str, &str, &str)]) -> String {
    let body: String = rows
        .iter()
        .map(|(locode, name, coords)| {
            format!(
                "<tr><td>&nbsp;</td><td>{locode}</td><td>{name}</td><td>{name}</td>\
                 <td></td><td>1-------</td><td>AI</td><td>0701</td>\
                 <td></td><td>{coords}</td><td></td></tr>"
            )
        })
        .collect();
    format!(
        r#"<html><body>
        <table width="100%"><tr><td>header chrome</td></tr></table>
        <table border="1" cellpadding="1" cellspacing="0" width="100%">
        <tr><td>Ch</td><td>LOCODE</td><td>Name</td><td>NameWoDiacritics</td>
        <td>SubDiv</td><td>Function</td><td>Status</td><td>Date</td>
        <td>IATA</td><td>Coordinates</td><td>Remarks</td></tr>
        {body}</table></body></html>"#
    )
}

#[tokio::test]
async fn test_fetch_parse_and_cache_roundtrip() {
    let server = MockServer::start();
    let page_mock = server.mock(|when, then| {
        when.method(GET).path("/us.htm");
        then.status(200)
            .header("Content-Type", "text/html;charset=UTF-8")
            .body(directory_page(&[
                ("US&nbsp;NYC", "New York", "4042N 07400W"),
                ("US&nbsp;BOS", "Boston", "4222N 07103W"),
            ]));
    });

    let directory = PortDirectory::new(UneceDirectory::new(server.base_url()).unwrap());

    let ports = directory.ports_for_country("US").await.unwrap();
    assert_eq!(ports.len(), 2);
    assert_eq!(ports[0].locode, "USNYC");
    assert_eq!(ports[0].coordinates.as_deref(), Some("4042N 07400W"));

    // Second read and a locode lookup come from the cache.
    directory.ports_for_country("us").await.unwrap();
    let port = directory.find_by_locode("USBOS").await.unwrap().unwrap();
    assert_eq!(port.name, "Boston");

    page_mock.assert_hits(1);
}

#[tokio::test]
async fn test_missing_country_propagates_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/zz.htm");
        then.status(404).body("Not Found");
    });

    let directory = PortDirectory::new(UneceDirectory::new(server.base_url()).unwrap());
    let err = directory.ports_for_country("zz").await.unwrap_err();

    assert!(matches!(
        err,
        PortsError::UpstreamStatus { status: 404, .. }
    ));
}

#[tokio::test]
async fn test_blank_page_is_empty_input_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/xx.htm");
        then.status(200).body("   ");
    });

    let directory = PortDirectory::new(UneceDirectory::new(server.base_url()).unwrap());
    let err = directory.ports_for_country("xx").await.unwrap_err();

    assert!(matches!(err, PortsError::EmptyInput));
}

#[tokio::test]
async fn test_page_without_data_table_is_empty_list() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/yy.htm");
        then.status(200)
            .body("<html><body><p>No listings for this country.</p></body></html>");
    });

    let directory = PortDirectory::new(UneceDirectory::new(server.base_url()).unwrap());
    let ports = directory.ports_for_country("yy").await.unwrap();

    assert!(ports.is_empty());
}
