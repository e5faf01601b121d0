//! Rendered-page fixtures shared by the parser and pipeline tests.

pub const BASE: &str = "https://www.bilhandlare.example/modeller/?nav=nyheter";

/// Two categories, three cards, EV9 listed under both
pub const LISTING: &str = r#"<!DOCTYPE html>
<html><body>
<div id="nyheter" class="cat-wrap">
  <h2 class="h4">Nyheter&nbsp;&amp;
      erbjudanden</h2>
  <div class="models">
    <div class="model">
      <a href="https://www.bilhandlare.example/modeller/ev3/">
        <img src="https://www.bilhandlare.example/wp-content/uploads/ev3.png" alt="Kia EV3">
        <h3 class="h5">EV3</h3>
        <p>Helt ny kompakt elbil.</p>
      </a>
    </div>
    <div class="model">
      <a href="https://www.bilhandlare.example/modeller/ev9/">
        <img src="https://www.bilhandlare.example/wp-content/uploads/ev9.png" alt="Kia EV9">
        <h3 class="h5">EV9</h3>
        <p>Sjusitsig elektrisk SUV.</p>
      </a>
    </div>
  </div>
</div>
<div id="suv" class="cat-wrap">
  <h2 class="h4">SUV</h2>
  <div class="models">
    <div class="model">
      <a href="https://www.bilhandlare.example/modeller/ev9/">
        <img src="https://www.bilhandlare.example/wp-content/uploads/ev9.png" alt="Kia EV9">
        <h3 class="h5">EV9</h3>
        <p>Sjusitsig elektrisk SUV.</p>
      </a>
    </div>
  </div>
</div>
</body></html>"#;

/// A category block whose cards carry no links
pub const LISTING_WITHOUT_LINKS: &str = r#"<html><body>
<div id="tom" class="cat-wrap">
  <h2 class="h4">Tom</h2>
  <div class="model"><h3 class="h5">Okänd</h3></div>
</div>
</body></html>"#;

pub const EV3_URL: &str = "https://www.bilhandlare.example/modeller/ev3/";
pub const EV9_URL: &str = "https://www.bilhandlare.example/modeller/ev9/";

/// EV3 detail page with two financing tabs
pub const EV3_PAGE: &str = r#"<html>
<head>
  <meta property="og:image" content="https://www.bilhandlare.example/wp-content/uploads/ev3-og.jpg">
</head>
<body>
  <h1> Kia EV3 </h1>
  <div class="img-container"><img src="/wp-content/uploads/ev3-variant.png"></div>
  <button class="financing-menu-button" data-location="?finansiering=privatleasing">Privatleasing</button>
  <button class="financing-menu-button" data-location="?finansiering=billan">Billån</button>
  <button class="financing-menu-button">Kontant</button>
</body>
</html>"#;

pub const EV3_LEASING_URL: &str =
    "https://www.bilhandlare.example/modeller/ev3/?finansiering=privatleasing";
pub const EV3_LOAN_URL: &str = "https://www.bilhandlare.example/modeller/ev3/?finansiering=billan";

pub const EV3_LEASING: &str = r#"<html><body>
<form>
  <input type="radio" id="p1" name="pkg"><label for="p1">Air 3 412 kr/mån</label>
  <input type="radio" id="p2" name="pkg"><label for="p2">GT-Line 4 195 kr/mån</label>
  <label><input type="radio" name="pkg2"> Air 3 200 kr/mån</label>
  <input type="radio" id="a1" name="acc"><label for="a1">+ Dragkrok 299 kr/mån</label>
  <input type="radio" id="n1" name="note"><label for="n1">Privatleasing 12-36 mån 500 kr/mån</label>
  <input type="radio" id="x1" name="x"><label for="x1">Välj färg</label>
  <label>Air 2 999 kr/mån</label>
</form>
</body></html>"#;

pub const EV3_LOAN: &str = r#"<html><body>
  <label><input type="radio" name="pkg"> Air 2 590 kr/mån</label>
</body></html>"#;

/// EV9 page: placeholder variant image, og:image fallback, no financing tabs
pub const EV9_PAGE: &str = r#"<html>
<head>
  <meta property="og:image" content="https://www.bilhandlare.example/wp-content/uploads/ev9-og.jpg">
</head>
<body>
  <h1>Kia EV9</h1>
  <div class="img-container"><img src="https://www.bilhandlare.example/wp-content/uploads/elbil.png"></div>
</body>
</html>"#;
