// In-memory shop used by the tests: canned responses per URL plus a request log

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

use crate::error::TransportError;
use crate::transport::{RawResponse, Transport};

pub const API_URL: &str = "https://shop.test/api";

#[derive(Debug)]
enum Reply {
    Status(u16, String),
    Fail(String),
}

#[derive(Debug)]
pub struct MockShop {
    routes: HashMap<String, Reply>,
    requests: Mutex<Vec<String>>,
}

impl MockShop {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Shop with `count` orders. Odd orders ship to an address with a region,
    /// company and second address line, even orders to one without.
    pub fn with_orders(count: u32) -> Self {
        let mut shop = Self::new()
            .route(API_URL, 200, api_root_xml())
            .route(format!("{}/orders", API_URL), 200, orders_xml(count))
            .route(format!("{}/order_states/4", API_URL), 200, order_state_xml("Shipped"))
            .route(
                format!("{}/customers/7", API_URL),
                200,
                customer_xml("example@example.co"),
            )
            .route(format!("{}/countries/21", API_URL), 200, country_xml())
            .route(format!("{}/states/44", API_URL), 200, state_xml("South Dakota"));

        for id in 1..=count {
            let odd = id % 2 == 1;
            shop = shop
                .route(format!("{}/orders/{}", API_URL, id), 200, order_xml(id, id))
                .route(
                    format!("{}/addresses/{}", API_URL, id),
                    200,
                    address_xml(id, odd, odd),
                );
        }
        shop
    }

    pub fn route(mut self, url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        self.routes
            .insert(url.into(), Reply::Status(status, body.into()));
        self
    }

    pub fn fail(mut self, url: impl Into<String>, message: impl Into<String>) -> Self {
        self.routes.insert(url.into(), Reply::Fail(message.into()));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().clear();
    }
}

#[async_trait]
impl Transport for MockShop {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
        self.requests.lock().push(url.to_string());

        match self.routes.get(url) {
            Some(Reply::Status(status, body)) => Ok(RawResponse::new(*status, body.clone())),
            Some(Reply::Fail(message)) => Err(TransportError::Other(message.clone())),
            None => Ok(RawResponse::new(404, "")),
        }
    }
}

fn envelope(content: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <prestashop xmlns:xlink=\"http://www.w3.org/1999/xlink\">\n{}\n</prestashop>",
        content
    )
}

pub fn api_root_xml() -> String {
    envelope(&format!(
        r#"<api shopName="Test shop">
	<orders xlink:href="{api}/orders" get="true" put="false" post="false" delete="false" head="true">
		<description xlink:href="{api}/orders" get="true">The Customers orders</description>
	</orders>
</api>"#,
        api = API_URL
    ))
}

pub fn orders_xml(count: u32) -> String {
    let orders: String = (1..=count)
        .map(|id| format!("\t<order id=\"{id}\" xlink:href=\"{api}/orders/{id}\"/>\n", id = id, api = API_URL))
        .collect();
    envelope(&format!("<orders>\n{}</orders>", orders))
}

pub fn order_xml(id: u32, address_id: u32) -> String {
    envelope(&format!(
        r#"<order>
	<id><![CDATA[{id}]]></id>
	<id_address_delivery xlink:href="{api}/addresses/{address}"><![CDATA[{address}]]></id_address_delivery>
	<id_address_invoice xlink:href="{api}/addresses/{address}"><![CDATA[{address}]]></id_address_invoice>
	<id_cart xlink:href="{api}/carts/{id}"><![CDATA[{id}]]></id_cart>
	<id_currency xlink:href="{api}/currencies/1"><![CDATA[1]]></id_currency>
	<id_customer xlink:href="{api}/customers/7"><![CDATA[7]]></id_customer>
	<current_state xlink:href="{api}/order_states/4"><![CDATA[4]]></current_state>
	<payment><![CDATA[Bank wire]]></payment>
	<total_paid><![CDATA[90.000000]]></total_paid>
	<total_paid_real><![CDATA[0.000000]]></total_paid_real>
	<reference><![CDATA[ABCDEF]]></reference>
	<associations>
		<order_rows nodeType="order_row" virtualEntity="true">
			<order_row>
				<id><![CDATA[{id}]]></id>
				<product_id xlink:href="{api}/products/2"><![CDATA[2]]></product_id>
				<product_quantity><![CDATA[1]]></product_quantity>
			</order_row>
		</order_rows>
	</associations>
</order>"#,
        id = id,
        address = address_id,
        api = API_URL
    ))
}

pub fn order_state_xml(name: &str) -> String {
    envelope(&format!(
        r#"<order_state>
	<id><![CDATA[4]]></id>
	<unremovable><![CDATA[1]]></unremovable>
	<color><![CDATA[#8A2BE2]]></color>
	<name><language id="1" xlink:href="{api}/languages/1"><![CDATA[{name}]]></language></name>
</order_state>"#,
        name = name,
        api = API_URL
    ))
}

pub fn customer_xml(email: &str) -> String {
    envelope(&format!(
        r#"<customer>
	<id><![CDATA[7]]></id>
	<id_gender><![CDATA[1]]></id_gender>
	<email><![CDATA[{email}]]></email>
	<lastname><![CDATA[Doe]]></lastname>
	<firstname><![CDATA[John]]></firstname>
</customer>"#,
        email = email
    ))
}

pub fn address_xml(id: u32, with_state: bool, full: bool) -> String {
    let state = if with_state {
        format!(
            r#"<id_state xlink:href="{}/states/44"><![CDATA[44]]></id_state>"#,
            API_URL
        )
    } else {
        "<id_state><![CDATA[0]]></id_state>".to_string()
    };
    let (company, address2) = if full {
        ("<![CDATA[EA Sports]]>", "<![CDATA[And something else]]>")
    } else {
        ("", "")
    };

    envelope(&format!(
        r#"<address>
	<id><![CDATA[{id}]]></id>
	<id_customer xlink:href="{api}/customers/7"><![CDATA[7]]></id_customer>
	<id_manufacturer><![CDATA[0]]></id_manufacturer>
	<id_country xlink:href="{api}/countries/21"><![CDATA[21]]></id_country>
	{state}
	<alias><![CDATA[Home]]></alias>
	<company>{company}</company>
	<lastname><![CDATA[Doe]]></lastname>
	<firstname><![CDATA[John]]></firstname>
	<address1><![CDATA[4530 Abra Kadabra]]></address1>
	<address2>{address2}</address2>
	<postcode><![CDATA[1234]]></postcode>
	<city><![CDATA[Moscow]]></city>
	<phone><![CDATA[123456778]]></phone>
	<phone_mobile><![CDATA[123456778]]></phone_mobile>
</address>"#,
        id = id,
        api = API_URL,
        state = state,
        company = company,
        address2 = address2
    ))
}

pub fn country_xml() -> String {
    envelope(&format!(
        r#"<country>
	<id><![CDATA[21]]></id>
	<id_zone xlink:href="{api}/zones/2"><![CDATA[2]]></id_zone>
	<iso_code><![CDATA[AE]]></iso_code>
	<call_prefix><![CDATA[971]]></call_prefix>
	<contains_states><![CDATA[0]]></contains_states>
	<zip_code_format></zip_code_format>
	<name>
		<language id="1" xlink:href="{api}/languages/1"><![CDATA[United Arab Emirates]]></language>
		<language id="2" xlink:href="{api}/languages/2"><![CDATA[Vereinigte Arabische Emirate]]></language>
	</name>
</country>"#,
        api = API_URL
    ))
}

pub fn state_xml(name: &str) -> String {
    envelope(&format!(
        r#"<state>
	<id><![CDATA[44]]></id>
	<id_zone xlink:href="{api}/zones/2"><![CDATA[2]]></id_zone>
	<id_country xlink:href="{api}/countries/21"><![CDATA[21]]></id_country>
	<iso_code><![CDATA[SD]]></iso_code>
	<name><![CDATA[{name}]]></name>
	<active><![CDATA[1]]></active>
</state>"#,
        name = name,
        api = API_URL
    ))
}
